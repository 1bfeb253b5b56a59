// crates/travelmap-core/src/resolve.rs

//! # Country Resolution
//!
//! Joins the visited-city list against the countries GeoJSON: one outline per
//! visited country, carrying the cities inside it.
//!
//! The join is best effort. A country without a matching feature is left out
//! of the result rather than reported as an error.

use crate::alias::{alternative_name, is_multi_territory};
use crate::geometry::{centroid, BoundingBox, MAINLAND_EUROPE};
use crate::model::{CountryResolution, GeoFeature, VisitedCity};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Resolved countries keyed by the journal's country name.
///
/// Iteration follows the order in which each country first appears in the
/// visited-city list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountryMap {
    entries: Vec<CountryResolution>,
}

impl CountryMap {
    pub fn get(&self, name: &str) -> Option<&CountryResolution> {
        self.entries.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryResolution> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<CountryResolution> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a CountryMap {
    type Item = &'a CountryResolution;
    type IntoIter = std::slice::Iter<'a, CountryResolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serializes as a JSON object `{ name: resolution }`, the shape map layers
/// consume.
impl Serialize for CountryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for c in &self.entries {
            map.serialize_entry(&c.name, c)?;
        }
        map.end()
    }
}

/// Group cities by country, keeping first-appearance order of countries and
/// input order of cities within each group.
pub fn group_by_country(cities: &[VisitedCity]) -> Vec<(String, Vec<VisitedCity>)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<VisitedCity>)> = Vec::new();

    for city in cities {
        let idx = *slots.entry(city.country.as_str()).or_insert_with(|| {
            groups.push((city.country.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(city.clone());
    }
    groups
}

/// Features whose `name` equals `country`, falling back to the alternate
/// name when the exact lookup finds nothing.
pub fn candidate_features<'a>(country: &str, features: &'a [GeoFeature]) -> Vec<&'a GeoFeature> {
    let by_name = |name: &str| -> Vec<&'a GeoFeature> {
        features.iter().filter(|f| f.name() == name).collect()
    };

    let found = by_name(country);
    if !found.is_empty() {
        return found;
    }
    match alternative_name(country) {
        Some(alt) => {
            debug!(country, alt, "retrying feature lookup with alternate name");
            by_name(alt)
        }
        None => found,
    }
}

/// First candidate whose coarse centroid lies inside `region`.
///
/// Candidates without a valid centroid are skipped.
pub fn first_within<'a>(candidates: &[&'a GeoFeature], region: &BoundingBox) -> Option<&'a GeoFeature> {
    candidates
        .iter()
        .copied()
        .find(|f| centroid(f.coordinates()).is_some_and(|c| region.contains(c)))
}

/// Pick the single outline for `country` among its candidates.
///
/// Multi-territory countries with several candidates prefer the one whose
/// centroid lies in mainland Europe. Everything else, including a
/// multi-territory country with no European candidate, takes the first.
pub fn select_feature<'a>(country: &str, candidates: &[&'a GeoFeature]) -> Option<&'a GeoFeature> {
    let first = *candidates.first()?;

    if candidates.len() > 1 && is_multi_territory(country) {
        if let Some(f) = first_within(candidates, &MAINLAND_EUROPE) {
            return Some(f);
        }
        debug!(
            country,
            candidates = candidates.len(),
            "no candidate inside mainland Europe; using the first"
        );
    }
    Some(first)
}

/// Map each visited country to its best-matching feature and its cities.
///
/// This is a pure function of its inputs. Countries with no matching
/// feature, even after the alternate-name lookup, are omitted.
///
/// # Examples
///
/// ```rust
/// use travelmap_core::model::{FeatureCollection, VisitedCity};
/// use travelmap_core::resolve::resolve;
///
/// let features: FeatureCollection = serde_json::from_str(r#"{
///   "features": [
///     { "properties": { "name": "France" },
///       "geometry": { "type": "Polygon", "coordinates": [[[-53.0, 4.0], [-52.0, 5.0]]] } },
///     { "properties": { "name": "France" },
///       "geometry": { "type": "Polygon", "coordinates": [[[2.0, 46.0], [3.0, 47.0]]] } }
///   ]
/// }"#).unwrap();
///
/// let cities = vec![VisitedCity {
///     city: "Paris".into(),
///     country: "France".into(),
///     coordinates: [2.35, 48.85],
///     photos: None,
/// }];
///
/// let countries = resolve(&cities, &features.features);
/// let france = countries.get("France").unwrap();
/// assert_eq!(france.geojson, features.features[1]);
/// ```
pub fn resolve(cities: &[VisitedCity], features: &[GeoFeature]) -> CountryMap {
    let mut entries = Vec::new();

    for (country, members) in group_by_country(cities) {
        let candidates = candidate_features(&country, features);
        match select_feature(&country, &candidates) {
            Some(feature) => entries.push(CountryResolution {
                geojson: feature.clone(),
                name: country,
                cities: members,
            }),
            None => warn!(country = %country, cities = members.len(), "no feature for country; omitting"),
        }
    }

    CountryMap { entries }
}

/// Visited countries missing from a resolution, in first-appearance order.
pub fn unmatched_countries(cities: &[VisitedCity], resolved: &CountryMap) -> Vec<String> {
    group_by_country(cities)
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| !resolved.contains(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LonLat;
    use crate::model::{FeatureProperties, Geometry};
    use serde_json::{json, Map, Value};

    fn city(name: &str, country: &str, lon: f64, lat: f64) -> VisitedCity {
        VisitedCity {
            city: name.into(),
            country: country.into(),
            coordinates: [lon, lat],
            photos: None,
        }
    }

    fn feature(name: &str, coordinates: Value) -> GeoFeature {
        GeoFeature {
            kind: "Feature".into(),
            properties: FeatureProperties {
                name: name.into(),
                extra: Map::new(),
            },
            geometry: Some(Geometry {
                kind: "Polygon".into(),
                coordinates,
            }),
        }
    }

    fn square(lon: f64, lat: f64) -> Value {
        json!([[[lon - 1.0, lat - 1.0], [lon + 1.0, lat - 1.0], [lon + 1.0, lat + 1.0], [lon - 1.0, lat + 1.0]]])
    }

    #[test]
    fn picks_mainland_france_over_guiana() {
        let guiana = feature("France", square(-53.0, 4.0));
        let mainland = feature("France", square(2.0, 46.0));
        let features = vec![guiana, mainland.clone()];

        let out = resolve(&[city("Paris", "France", 2.35, 48.85)], &features);
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("France").unwrap().geojson, mainland);
    }

    #[test]
    fn uses_alternate_name_when_exact_missing() {
        let features = vec![feature("España", square(-3.7, 40.4)), feature("Czechia", square(15.0, 50.0))];
        let cities = [
            city("Madrid", "Spain", -3.7, 40.4),
            city("Prague", "Czech Republic", 14.4, 50.1),
        ];
        let out = resolve(&cities, &features);
        assert_eq!(out.get("Spain").unwrap().geojson.name(), "España");
        assert_eq!(out.get("Czech Republic").unwrap().geojson.name(), "Czechia");
    }

    #[test]
    fn exact_name_beats_alternate() {
        let features = vec![feature("España", square(-3.7, 40.4)), feature("Spain", square(-4.0, 40.0))];
        let out = resolve(&[city("Madrid", "Spain", -3.7, 40.4)], &features);
        assert_eq!(out.get("Spain").unwrap().geojson.name(), "Spain");
    }

    #[test]
    fn drops_unknown_countries_silently() {
        let features = vec![feature("Hungary", square(19.0, 47.0))];
        let cities = [city("Budapest", "Hungary", 19.04, 47.5), city("Atlantis City", "Atlantis", 0.0, 0.0)];
        let out = resolve(&cities, &features);
        assert_eq!(out.names().collect::<Vec<_>>(), ["Hungary"]);
        assert_eq!(unmatched_countries(&cities, &out), ["Atlantis"]);
    }

    #[test]
    fn groups_cities_in_input_order() {
        let features = vec![feature("Hungary", square(19.0, 47.0)), feature("Austria", square(15.0, 47.5))];
        let cities = [
            city("Budapest", "Hungary", 19.04, 47.5),
            city("Vienna", "Austria", 16.37, 48.2),
            city("Eger", "Hungary", 20.37, 47.9),
        ];
        let out = resolve(&cities, &features);
        assert_eq!(out.names().collect::<Vec<_>>(), ["Hungary", "Austria"]);
        let hu: Vec<&str> = out.get("Hungary").unwrap().cities.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(hu, ["Budapest", "Eger"]);
    }

    #[test]
    fn non_multi_territory_takes_first_candidate() {
        // Both outside Europe; Norway is not on the multi-territory list.
        let a = feature("Norway", square(-53.0, 4.0));
        let b = feature("Norway", square(10.0, 60.0));
        let out = resolve(&[city("Oslo", "Norway", 10.75, 59.9)], &[a.clone(), b]);
        assert_eq!(out.get("Norway").unwrap().geojson, a);
    }

    #[test]
    fn falls_back_to_first_when_nothing_in_europe() {
        let a = feature("France", square(-53.0, 4.0));
        let b = feature("France", square(55.5, -21.1));
        let out = resolve(&[city("Cayenne", "France", -52.3, 4.9)], &[a.clone(), b]);
        assert_eq!(out.get("France").unwrap().geojson, a);
    }

    #[test]
    fn skips_candidates_without_centroid() {
        let broken = feature("Italy", json!([[[]]]));
        let mainland = feature("Italy", square(12.5, 42.0));
        let out = resolve(&[city("Rome", "Italy", 12.5, 41.9)], &[broken, mainland.clone()]);
        assert_eq!(out.get("Italy").unwrap().geojson, mainland);
    }

    #[test]
    fn single_candidate_wins_even_outside_europe() {
        let only = feature("France", square(-53.0, 4.0));
        assert_eq!(select_feature("France", &[&only]), Some(&only));
        assert_eq!(select_feature("France", &[]), None);
    }

    #[test]
    fn chosen_centroid_is_in_europe_when_possible() {
        let features = vec![
            feature("Portugal", square(-25.0, 37.8)),
            feature("Portugal", square(-16.9, 32.7)),
            feature("Portugal", square(-8.0, 39.5)),
        ];
        let out = resolve(&[city("Lisbon", "Portugal", -9.14, 38.72)], &features);
        let c = centroid(out.get("Portugal").unwrap().geojson.coordinates()).unwrap();
        assert!(MAINLAND_EUROPE.contains(c));
        assert_eq!(c, LonLat::new(-8.0, 39.5));
    }

    #[test]
    fn serializes_as_object() {
        let features = vec![feature("Hungary", square(19.0, 47.0))];
        let out = resolve(&[city("Budapest", "Hungary", 19.04, 47.5)], &features);
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["Hungary"]["name"], "Hungary");
        assert_eq!(v["Hungary"]["cities"][0]["city"], "Budapest");
    }
}

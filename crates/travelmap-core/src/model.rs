// crates/travelmap-core/src/model.rs

//! # Data Model
//!
//! Serde mirrors of the static JSON files the travel journal is built from.
//! Field names follow the files (camelCase), Rust names follow Rust.
//!
//! Coordinates in every file are `[lon, lat]`, the GeoJSON order.

use crate::geometry::LonLat;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// -----------------------------------------------------------------------------
// VISITED PLACES
// -----------------------------------------------------------------------------

/// One visited place on the world map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisitedCity {
    pub city: String,
    pub country: String,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

impl VisitedCity {
    pub fn position(&self) -> LonLat {
        LonLat::new(self.coordinates[0], self.coordinates[1])
    }

    pub fn has_photos(&self) -> bool {
        self.photos.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// Top-level shape of `visited.json`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VisitedData {
    pub visited: Vec<VisitedCity>,
}

// -----------------------------------------------------------------------------
// GEOJSON
// -----------------------------------------------------------------------------

fn feature_tag() -> String {
    "Feature".to_string()
}

fn collection_tag() -> String {
    "FeatureCollection".to_string()
}

/// `null` reads as an empty string; a feature with no usable name simply
/// never matches a country.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Properties of a country feature. Only `name` is interpreted; everything
/// else is carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Geometry of a country feature.
///
/// `coordinates` stays raw JSON: polygons and multipolygons nest to different
/// depths, and malformed arrays must still load so they can degrade to "no
/// centroid" instead of failing the whole collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// One polygon or multipolygon per national territory. Several features may
/// share a `name` when a country has disjoint territories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    #[serde(rename = "type", default = "feature_tag")]
    pub kind: String,
    pub properties: FeatureProperties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl GeoFeature {
    pub fn name(&self) -> &str {
        &self.properties.name
    }

    /// Raw nested coordinates, or `Value::Null` when the feature has no geometry.
    pub fn coordinates(&self) -> &Value {
        static NULL: Value = Value::Null;
        self.geometry.as_ref().map(|g| &g.coordinates).unwrap_or(&NULL)
    }

    pub fn geometry_type(&self) -> &str {
        self.geometry.as_ref().map(|g| g.kind.as_str()).unwrap_or("")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_tag")]
    pub kind: String,
    pub features: Vec<GeoFeature>,
}

/// A country on the map: its chosen outline plus the visited cities in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryResolution {
    pub name: String,
    pub geojson: GeoFeature,
    pub cities: Vec<VisitedCity>,
}

// -----------------------------------------------------------------------------
// ITINERARIES
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPoint {
    pub name: String,
    pub address: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItineraryPoint {
    pub fn position(&self) -> LonLat {
        LonLat::new(self.coordinates[0], self.coordinates[1])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryMetadata {
    pub flags: String,
    pub emoji: String,
    pub countries: Vec<String>,
    #[serde(default)]
    pub points_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub points: Vec<ItineraryPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ItineraryMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    /// Related gallery ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub galleries: Option<Vec<String>>,
}

impl Itinerary {
    /// Countries listed in the metadata, empty when metadata is missing.
    pub fn countries(&self) -> &[String] {
        self.metadata
            .as_ref()
            .map(|m| m.countries.as_slice())
            .unwrap_or(&[])
    }
}

/// Entry of `itineraries/index.json`; `file` is relative to the index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryIndexEntry {
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ItineraryMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub galleries: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryIndex {
    pub itineraries: Vec<ItineraryIndexEntry>,
}

// -----------------------------------------------------------------------------
// GALLERIES
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

/// A gallery photo is either a bare path or a path with a caption.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GalleryPhoto {
    Path(String),
    Captioned {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl GalleryPhoto {
    pub fn src(&self) -> &str {
        match self {
            GalleryPhoto::Path(src) => src,
            GalleryPhoto::Captioned { src, .. } => src,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            GalleryPhoto::Path(_) => None,
            GalleryPhoto::Captioned { caption, .. } => caption.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub photos: Vec<GalleryPhoto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GalleryLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos_count: Option<usize>,
}

impl Gallery {
    pub fn country(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.country.as_deref())
    }

    pub fn city(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.city.as_deref())
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryIndexEntry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GalleryLocation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryIndex {
    pub galleries: Vec<GalleryIndexEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_keeps_unknown_properties() {
        let json = r#"{
            "type": "Feature",
            "properties": { "name": "France", "iso_a2": "FR" },
            "geometry": { "type": "Polygon", "coordinates": [[[2.0, 46.0], [3.0, 47.0]]] }
        }"#;
        let f: GeoFeature = serde_json::from_str(json).unwrap();
        assert_eq!(f.name(), "France");
        assert_eq!(f.properties.extra["iso_a2"], "FR");
        assert_eq!(f.geometry_type(), "Polygon");
    }

    #[test]
    fn feature_without_geometry_loads() {
        let f: GeoFeature =
            serde_json::from_str(r#"{ "properties": { "name": "Atlantis" } }"#).unwrap();
        assert!(f.geometry.is_none());
        assert!(f.coordinates().is_null());
        assert_eq!(f.kind, "Feature");
    }

    #[test]
    fn malformed_features_do_not_sink_the_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                { "properties": { "name": null },
                  "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0]]] } },
                { "properties": {},
                  "geometry": { "type": "Polygon", "coordinates": [] } },
                { "properties": { "name": "Hungary" },
                  "geometry": { "coordinates": [[[19.0, 47.5], [20.0, 47.0]]] } },
                { "properties": { "name": "France" },
                  "geometry": { "type": "Polygon", "coordinates": [[[2.0, 46.0], [3.0, 47.0]]] } }
            ]
        }"#;
        let fc: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(fc.features.len(), 4);
        assert_eq!(fc.features[0].name(), "");
        assert_eq!(fc.features[1].name(), "");
        assert_eq!(fc.features[2].geometry_type(), "");

        let visited: Vec<VisitedCity> = serde_json::from_str(
            r#"[
                { "city": "Paris", "country": "France", "coordinates": [2.35, 48.85] },
                { "city": "Budapest", "country": "Hungary", "coordinates": [19.04, 47.5] }
            ]"#,
        )
        .unwrap();
        let map = crate::resolve::resolve(&visited, &fc.features);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("France").unwrap().geojson.geometry_type(), "Polygon");
        assert!(map.contains("Hungary"));
    }

    #[test]
    fn gallery_photos_accept_both_shapes() {
        let json = r#"{
            "id": "lisbon",
            "title": "Lisbon",
            "photos": ["a.jpg", { "src": "b.jpg", "caption": "Tram 28" }]
        }"#;
        let g: Gallery = serde_json::from_str(json).unwrap();
        assert_eq!(g.photos[0].src(), "a.jpg");
        assert_eq!(g.photos[1].caption(), Some("Tram 28"));
        assert!(g.tags().is_empty());
    }

    #[test]
    fn itinerary_reads_camel_case() {
        let json = r#"{
            "id": "bud-2024",
            "title": "Budapest",
            "startDate": "2024-03-01",
            "endDate": "2024-03-04",
            "points": [{
                "name": "Parliament",
                "address": "Kossuth Lajos tér 1-3, Budapest, Hungary",
                "date": "2024-03-01",
                "coordinates": [19.0457, 47.5071]
            }],
            "metadata": { "flags": "🇭🇺", "emoji": "🏛️", "countries": ["Hungary"], "pointsCount": 1 }
        }"#;
        let it: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(it.start_date, "2024-03-01");
        assert_eq!(it.points[0].position().lat, 47.5071);
        assert_eq!(it.countries(), ["Hungary".to_string()]);
    }
}

// crates/travelmap-core/src/search.rs

//! List filtering for the itinerary and gallery overview pages.
//!
//! A record passes when the fuzzy query matches any of its searchable
//! fields **and** the optional country and year facets match exactly.

use crate::itinerary::year_of;
use crate::model::{Gallery, Itinerary};
use crate::traits::SearchableRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Query plus facet selection. Empty/`None` facets do not filter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl RecordFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        let c = country.into();
        self.country = (!c.is_empty()).then_some(c);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.country.is_none() && self.year.is_none()
    }

    pub fn matches_itinerary(&self, it: &Itinerary) -> bool {
        if !it.matches_query(&self.query) {
            return false;
        }
        if let Some(c) = &self.country {
            if !it.countries().iter().any(|x| x == c) {
                return false;
            }
        }
        if let Some(y) = self.year {
            if year_of(&it.start_date) != Some(y) {
                return false;
            }
        }
        true
    }

    pub fn matches_gallery(&self, g: &Gallery) -> bool {
        if !g.matches_query(&self.query) {
            return false;
        }
        if let Some(c) = &self.country {
            if g.country() != Some(c.as_str()) {
                return false;
            }
        }
        if let Some(y) = self.year {
            if g.year != Some(y) {
                return false;
            }
        }
        true
    }
}

/// Itineraries passing `filter`, in input order.
pub fn filter_itineraries<'a>(items: &'a [Itinerary], filter: &RecordFilter) -> Vec<&'a Itinerary> {
    items.iter().filter(|it| filter.matches_itinerary(it)).collect()
}

/// Galleries passing `filter`, in input order.
pub fn filter_galleries<'a>(items: &'a [Gallery], filter: &RecordFilter) -> Vec<&'a Gallery> {
    items.iter().filter(|g| filter.matches_gallery(g)).collect()
}

/// Generic variant for any searchable record; query only.
pub fn filter_records<'a, T: SearchableRecord>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|r| r.matches_query(query)).collect()
}

/// Distinct metadata countries across itineraries, ascending.
pub fn itinerary_countries(items: &[Itinerary]) -> Vec<String> {
    items
        .iter()
        .flat_map(|it| it.countries().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct start years across itineraries, newest first.
pub fn itinerary_years(items: &[Itinerary]) -> Vec<i32> {
    let years: BTreeSet<i32> = items.iter().filter_map(|it| year_of(&it.start_date)).collect();
    years.into_iter().rev().collect()
}

/// Distinct location countries across galleries, ascending.
pub fn gallery_countries(items: &[Gallery]) -> Vec<String> {
    items
        .iter()
        .filter_map(|g| g.country().map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct gallery years, newest first.
pub fn gallery_years(items: &[Gallery]) -> Vec<i32> {
    let years: BTreeSet<i32> = items.iter().filter_map(|g| g.year).collect();
    years.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GalleryLocation, ItineraryMetadata};

    fn itinerary(id: &str, title: &str, start: &str, countries: &[&str]) -> Itinerary {
        Itinerary {
            id: id.into(),
            title: title.into(),
            start_date: start.into(),
            end_date: start.into(),
            points: Vec::new(),
            description: None,
            image: None,
            metadata: Some(ItineraryMetadata {
                countries: countries.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            }),
            notes: None,
            links: None,
            galleries: None,
        }
    }

    fn gallery(id: &str, title: &str, country: Option<&str>, year: Option<i32>) -> Gallery {
        Gallery {
            id: id.into(),
            title: title.into(),
            description: None,
            image: None,
            photos: Vec::new(),
            location: country.map(|c| GalleryLocation {
                country: Some(c.into()),
                ..Default::default()
            }),
            tags: Some(vec!["street food".into()]),
            year,
            photos_count: None,
        }
    }

    fn trips() -> Vec<Itinerary> {
        vec![
            itinerary("bud", "Budapest Long Weekend", "2024-03-01", &["Hungary"]),
            itinerary("rome", "Rome and the Vatican", "2023-10-12", &["Italy", "Vatican City"]),
            itinerary("vie", "Christmas Markets", "2023-12-20", &["Austria"]),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let items = trips();
        assert!(RecordFilter::default().is_empty());
        assert_eq!(filter_itineraries(&items, &RecordFilter::default()).len(), 3);
    }

    #[test]
    fn query_matches_title_or_country() {
        let items = trips();
        let ids = |f: &RecordFilter| -> Vec<String> {
            filter_itineraries(&items, f).iter().map(|i| i.id.clone()).collect()
        };
        assert_eq!(ids(&RecordFilter::new("buda")), ["bud"]);
        assert_eq!(ids(&RecordFilter::new("austria")), ["vie"]);
        assert_eq!(ids(&RecordFilter::new("vatcan")), ["rome"]);
        assert!(ids(&RecordFilter::new("tokyo")).is_empty());
    }

    #[test]
    fn facets_are_exact_and_combined() {
        let items = trips();
        let f = RecordFilter::new("").with_country("Italy");
        assert_eq!(filter_itineraries(&items, &f).len(), 1);

        let f = RecordFilter::new("").with_year(2023);
        assert_eq!(filter_itineraries(&items, &f).len(), 2);

        let f = RecordFilter::new("markets").with_year(2024);
        assert!(filter_itineraries(&items, &f).is_empty());

        let f = RecordFilter::new("").with_country("");
        assert!(f.country.is_none());
    }

    #[test]
    fn itinerary_facets() {
        let items = trips();
        assert_eq!(
            itinerary_countries(&items),
            ["Austria", "Hungary", "Italy", "Vatican City"]
        );
        assert_eq!(itinerary_years(&items), [2024, 2023]);
    }

    #[test]
    fn gallery_filtering() {
        let items = vec![
            gallery("lis", "Lisbon Trams", Some("Portugal"), Some(2022)),
            gallery("bud", "Thermal Baths", Some("Hungary"), Some(2024)),
            gallery("misc", "Odds and Ends", None, None),
        ];
        assert_eq!(filter_galleries(&items, &RecordFilter::new("portgal")).len(), 1);
        assert_eq!(filter_galleries(&items, &RecordFilter::new("street")).len(), 3);
        assert_eq!(
            filter_galleries(&items, &RecordFilter::new("").with_country("Hungary"))[0].id,
            "bud"
        );
        assert!(filter_galleries(&items, &RecordFilter::new("").with_year(2020)).is_empty());
        assert_eq!(gallery_countries(&items), ["Hungary", "Portugal"]);
        assert_eq!(gallery_years(&items), [2024, 2022]);
    }

    #[test]
    fn generic_filter_over_index_entries() {
        let items = trips();
        let hits = filter_records(&items, "christmas");
        assert_eq!(hits.len(), 1);
    }
}

// crates/travelmap-core/src/traits.rs
use crate::model::{Gallery, Itinerary, ItineraryIndexEntry};
use crate::text::fuzzy_contains;

/// Records that can be filtered by the search box.
///
/// Implementors list the text fields a query is matched against; the
/// default [`SearchableRecord::matches_query`] accepts the record if the
/// query fuzzily matches **any** of them (see [`fuzzy_contains`]).
///
/// # Examples
/// ```rust
/// use travelmap_core::traits::SearchableRecord;
///
/// struct Note(&'static str);
/// impl SearchableRecord for Note {
///     fn search_fields(&self) -> Vec<&str> { vec![self.0] }
/// }
///
/// assert!(Note("Dinner in Ljubljana").matches_query("ljublana"));
/// assert!(!Note("Dinner in Ljubljana").matches_query("zagreb"));
/// ```
pub trait SearchableRecord {
    /// Text fields to search, in no particular order.
    fn search_fields(&self) -> Vec<&str>;

    /// `true` for an empty query, or if any field fuzzily matches.
    fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| fuzzy_contains(field, query))
    }
}

/// Itineraries search title, description and their metadata countries.
impl SearchableRecord for Itinerary {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(d) = &self.description {
            fields.push(d);
        }
        fields.extend(self.countries().iter().map(String::as_str));
        fields
    }
}

impl SearchableRecord for ItineraryIndexEntry {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        if let Some(m) = &self.metadata {
            fields.extend(m.countries.iter().map(String::as_str));
        }
        fields
    }
}

/// Galleries search title, description, tags and location.
impl SearchableRecord for Gallery {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.tags().iter().map(String::as_str));
        fields.extend(self.city());
        fields.extend(self.country());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GalleryLocation, ItineraryMetadata};

    #[test]
    fn index_entries_search_metadata_countries() {
        let entry: ItineraryIndexEntry = serde_json::from_str(
            r#"{
                "id": "rome-2023",
                "title": "Long weekend",
                "startDate": "2023-10-12",
                "endDate": "2023-10-14",
                "file": "2023/rome.json",
                "metadata": { "flags": "", "emoji": "", "countries": ["Italy", "Vatican City"] }
            }"#,
        )
        .unwrap();
        assert!(entry.matches_query("vatican"));
        assert!(entry.matches_query("italu"));
        assert!(!entry.matches_query("spain"));
    }

    #[test]
    fn gallery_fields_include_location() {
        let g = Gallery {
            id: "porto".into(),
            title: "Rooftops".into(),
            description: None,
            image: None,
            photos: Vec::new(),
            location: Some(GalleryLocation {
                city: Some("Porto".into()),
                country: Some("Portugal".into()),
                flag: None,
            }),
            tags: Some(vec!["azulejos".into()]),
            year: Some(2022),
            photos_count: None,
        };
        assert_eq!(g.search_fields(), ["Rooftops", "azulejos", "Porto", "Portugal"]);
        assert!(g.matches_query("azulejo"));
        assert!(g.matches_query("  "));
    }

    #[test]
    fn itinerary_without_metadata_searches_title() {
        let it = Itinerary {
            id: "x".into(),
            title: "Kraków in winter".into(),
            start_date: "2022-01-01".into(),
            end_date: "2022-01-03".into(),
            points: Vec::new(),
            description: Some("Pierogi everywhere".into()),
            image: None,
            metadata: None::<ItineraryMetadata>,
            notes: None,
            links: None,
            galleries: None,
        };
        assert!(it.matches_query("krakow"));
        assert!(it.matches_query("pierogi"));
        assert!(!it.matches_query("poland"));
    }
}

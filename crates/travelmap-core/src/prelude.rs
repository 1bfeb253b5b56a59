// crates/travelmap-core/src/prelude.rs

//! Common imports: `use travelmap_core::prelude::*;`

pub use crate::common::TravelStats;
pub use crate::config::Config;
pub use crate::error::{Result, TravelError};
pub use crate::geometry::{jitter_positions, BoundingBox, LonLat, MAINLAND_EUROPE};
pub use crate::itinerary::{generate_metadata, group_points_by_date, DayColors};
pub use crate::loader::DataSource;
pub use crate::model::{
    CountryResolution, FeatureCollection, Gallery, GeoFeature, Itinerary, ItineraryPoint,
    VisitedCity, VisitedData,
};
pub use crate::prefs::{MemoryStore, PreferenceStore};
pub use crate::resolve::{resolve, CountryMap};
pub use crate::search::{filter_galleries, filter_itineraries, RecordFilter};
pub use crate::text::fuzzy_contains;
pub use crate::traits::SearchableRecord;
pub use crate::validate::{validate_document, validate_itinerary, ValidationReport};

// crates/travelmap-core/src/lib.rs

//! Core of a static travel-journal map.
//!
//! - [`resolve`]: pick one country outline per visited country
//! - [`text`]: accent-insensitive, typo-tolerant search
//! - [`search`]: itinerary and gallery list filters built on it
//! - [`itinerary`], [`validate`], [`geometry`]: per-trip helpers
//! - [`loader`], [`config`]: reading the site's JSON files

pub mod alias; // Name tables: alternates, multi-territory, flags
pub mod common;
pub mod config;
pub mod error;
pub mod geometry;
pub mod itinerary;
pub mod loader;
pub mod model;
pub mod prefs;
pub mod prelude;
pub mod resolve;
pub mod search;
pub mod text;
pub mod traits;
pub mod validate;

// Re-exports
pub use crate::common::TravelStats;
pub use crate::config::Config;
pub use crate::error::{Result, TravelError};
pub use crate::loader::DataSource;
pub use crate::model::*;
pub use crate::resolve::{resolve, CountryMap};
pub use crate::text::{fuzzy_contains, normalize};
pub use crate::traits::SearchableRecord;

//! travelmap-cli
//! =============
//!
//! Command-line interface for the `travelmap-core` crate.
//!
//! This crate primarily provides a binary (`travelmap`). The library target
//! only exists so docs.rs renders this overview.
//!
//! Basic usage:
//!
//! ```text
//! travelmap --help
//! travelmap --data-dir public countries
//! travelmap itineraries budapset
//! travelmap itineraries --country Italy --year 2023
//! travelmap itinerary budapest-2024
//! travelmap validate --max-km 300
//! ```
//!
//! Every global option also reads an environment variable:
//! `TRAVELMAP_CONFIG`, `TRAVELMAP_DATA_DIR`, `TRAVELMAP_PREFS`.
#![cfg_attr(docsrs, feature(doc_cfg))]

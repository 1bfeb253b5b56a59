// src/lib.rs

//! Umbrella crate for the demos; everything lives in `travelmap-core`.

pub use travelmap_core::*;

// crates/travelmap-core/src/validate.rs

//! Sanity checks for itinerary coordinates.
//!
//! Catches the usual hand-editing mistakes: `[lat, lon]` written in the wrong
//! order, and a point pasted from a different trip.
//!
//! [`validate_document`] works on the raw JSON of an itinerary file, so a
//! point whose coordinates are not two numbers is reported on its own instead
//! of failing the whole file.

use crate::error::{Result, TravelError};
use crate::geometry::{haversine_km, mean_position, LonLat};
use crate::model::{Itinerary, ItineraryPoint};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub const DEFAULT_MAX_CENTROID_DISTANCE_KM: f64 = 500.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// `coordinates` missing or not a two-element array.
    InvalidCoordinates {
        index: usize,
        name: String,
    },
    NonFinite {
        index: usize,
        name: String,
    },
    /// Latitude beyond ±90 or longitude beyond ±180; usually swapped.
    OutOfRange {
        index: usize,
        name: String,
        lon: f64,
        lat: f64,
    },
    FarFromCentroid {
        index: usize,
        name: String,
        distance_km: f64,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::InvalidCoordinates { index, name } => {
                write!(f, "[{index}] {name}: invalid coordinates array")
            }
            Issue::NonFinite { index, name } => {
                write!(f, "[{index}] {name}: non-numeric coordinates")
            }
            Issue::OutOfRange {
                index,
                name,
                lon,
                lat,
            } => write!(
                f,
                "[{index}] {name}: lat/lon out of bounds (possible swap) -> [{lon}, {lat}]"
            ),
            Issue::FarFromCentroid {
                index,
                name,
                distance_km,
            } => write!(f, "[{index}] {name}: far from centroid (~{distance_km:.0} km)"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Check every point of `itinerary`. See [`validate_points`].
pub fn validate_itinerary(itinerary: &Itinerary, max_distance_km: f64) -> ValidationReport {
    validate_points(&itinerary.points, max_distance_km)
}

/// Check point coordinates.
///
/// - non-finite values are errors and the point is left out of the centroid
/// - out-of-range values are warnings; the point still counts
/// - points more than `max_distance_km` from the mean position are warnings
pub fn validate_points(points: &[ItineraryPoint], max_distance_km: f64) -> ValidationReport {
    let checked = points.iter().enumerate().map(|(index, p)| {
        let pos = p.position();
        let pos = if pos.lon.is_finite() && pos.lat.is_finite() {
            Ok(pos)
        } else {
            Err(Issue::NonFinite {
                index,
                name: p.name.clone(),
            })
        };
        (index, p.name.as_str(), pos)
    });
    check_positions(checked, max_distance_km)
}

/// Check the points of an itinerary file as raw JSON.
///
/// Same rules as [`validate_points`], plus an error for any point whose
/// `coordinates` is not an array of exactly two numbers. Only a document
/// without a `points` array is rejected outright.
pub fn validate_document(doc: &Value, max_distance_km: f64) -> Result<ValidationReport> {
    let points = doc
        .get("points")
        .and_then(Value::as_array)
        .ok_or_else(|| TravelError::InvalidData("itinerary has no `points` array".into()))?;

    let checked = points.iter().enumerate().map(|(index, p)| {
        let name = p.get("name").and_then(Value::as_str).unwrap_or("?");
        (index, name, raw_position(index, name, p.get("coordinates")))
    });
    Ok(check_positions(checked, max_distance_km))
}

fn raw_position(
    index: usize,
    name: &str,
    coordinates: Option<&Value>,
) -> std::result::Result<LonLat, Issue> {
    let pair = match coordinates.and_then(Value::as_array) {
        Some(pair) if pair.len() == 2 => pair,
        _ => {
            return Err(Issue::InvalidCoordinates {
                index,
                name: name.to_string(),
            })
        }
    };
    match (pair[0].as_f64(), pair[1].as_f64()) {
        (Some(lon), Some(lat)) => Ok(LonLat::new(lon, lat)),
        _ => Err(Issue::NonFinite {
            index,
            name: name.to_string(),
        }),
    }
}

fn check_positions<'a>(
    points: impl Iterator<Item = (usize, &'a str, std::result::Result<LonLat, Issue>)>,
    max_distance_km: f64,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut usable: Vec<(usize, &str, LonLat)> = Vec::new();

    for (index, name, pos) in points {
        let pos = match pos {
            Ok(pos) => pos,
            Err(issue) => {
                report.errors.push(issue);
                continue;
            }
        };
        if pos.lat.abs() > 90.0 || pos.lon.abs() > 180.0 {
            report.warnings.push(Issue::OutOfRange {
                index,
                name: name.to_string(),
                lon: pos.lon,
                lat: pos.lat,
            });
        }
        usable.push((index, name, pos));
    }

    let positions: Vec<LonLat> = usable.iter().map(|(_, _, pos)| *pos).collect();
    if let Some(center) = mean_position(&positions) {
        for (index, name, pos) in usable {
            let d = haversine_km(pos, center);
            if d > max_distance_km {
                report.warnings.push(Issue::FarFromCentroid {
                    index,
                    name: name.to_string(),
                    distance_km: d,
                });
            }
        }
    }

    report
}

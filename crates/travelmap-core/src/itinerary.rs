// crates/travelmap-core/src/itinerary.rs

//! Per-trip helpers: metadata (flags, emoji, countries), day grouping, the
//! route line and per-day marker colors.

use crate::alias::{emoji_for, flag_for, is_known_country, DEFAULT_EMOJI, DEFAULT_FLAG};
use crate::error::{Result, TravelError};
use crate::geometry::{haversine_km, LonLat};
use crate::model::{Itinerary, ItineraryMetadata, ItineraryPoint};
use crate::prefs::PreferenceStore;
use crate::text::slugify;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

// -----------------------------------------------------------------------------
// DATES
// -----------------------------------------------------------------------------

/// Parse the date formats found in itinerary files: `2024-03-01`, RFC 3339,
/// or a naive `2024-03-01T10:00:00`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|d| d.date())
        })
}

pub fn year_of(date: &str) -> Option<i32> {
    parse_date(date).map(|d| d.year())
}

/// Relative path for a new itinerary file: `"<year>/<slug>.json"`.
pub fn itinerary_filename(title: &str, start_date: &str) -> Result<String> {
    let year = year_of(start_date)
        .ok_or_else(|| TravelError::InvalidData(format!("unparseable start date: {start_date:?}")))?;
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(TravelError::InvalidData(format!("title has no usable characters: {title:?}")));
    }
    Ok(format!("{year}/{slug}.json"))
}

// -----------------------------------------------------------------------------
// METADATA
// -----------------------------------------------------------------------------

/// Countries visited by an itinerary, in first-seen order.
///
/// The country is taken from the last comma-separated part of each address
/// when that part is a known country; any address mentioning the Vatican
/// counts as Vatican City regardless of how it ends.
pub fn extract_countries(points: &[ItineraryPoint]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in points {
        let country = if p.address.contains("Vatican") || p.address.contains("Vaticano") {
            Some("Vatican City")
        } else {
            p.address
                .rsplit(',')
                .next()
                .map(str::trim)
                .filter(|last| !last.is_empty() && is_known_country(last))
        };
        if let Some(c) = country {
            if !out.iter().any(|x| x == c) {
                out.push(c.to_string());
            }
        }
    }
    out
}

/// Space-separated flags, one per country, globe for unknown ones.
pub fn flags_for(countries: &[String]) -> String {
    countries
        .iter()
        .map(|c| flag_for(c).unwrap_or(DEFAULT_FLAG))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emoji of the first country, airplane when there is none.
pub fn emoji_for_countries(countries: &[String]) -> &'static str {
    countries
        .first()
        .map(|c| emoji_for(c).unwrap_or(DEFAULT_EMOJI))
        .unwrap_or(DEFAULT_EMOJI)
}

pub fn generate_metadata(itinerary: &Itinerary) -> ItineraryMetadata {
    let countries = extract_countries(&itinerary.points);
    ItineraryMetadata {
        flags: flags_for(&countries),
        emoji: emoji_for_countries(&countries).to_string(),
        points_count: itinerary.points.len(),
        countries,
    }
}

/// Fill in metadata if the file did not ship any. Existing metadata is kept.
pub fn ensure_metadata(mut itinerary: Itinerary) -> Itinerary {
    if itinerary.metadata.is_none() {
        itinerary.metadata = Some(generate_metadata(&itinerary));
    }
    itinerary
}

// -----------------------------------------------------------------------------
// DAYS & ROUTE
// -----------------------------------------------------------------------------

/// Points of one calendar day, in file order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayGroup<'a> {
    pub date: &'a str,
    pub points: Vec<&'a ItineraryPoint>,
}

/// Group points by their `date` string, days ascending.
pub fn group_points_by_date(points: &[ItineraryPoint]) -> Vec<DayGroup<'_>> {
    let mut days: BTreeMap<&str, Vec<&ItineraryPoint>> = BTreeMap::new();
    for p in points {
        days.entry(p.date.as_str()).or_default().push(p);
    }
    days.into_iter()
        .map(|(date, points)| DayGroup { date, points })
        .collect()
}

/// Distinct dates, ascending.
pub fn day_keys(points: &[ItineraryPoint]) -> Vec<&str> {
    group_points_by_date(points).into_iter().map(|d| d.date).collect()
}

/// Polyline through every point in file order, as `[lat, lon]` pairs.
pub fn route_line(points: &[ItineraryPoint]) -> Vec<[f64; 2]> {
    points.iter().map(|p| p.position().to_lat_lng()).collect()
}

/// Length of the route in kilometers, summing straight legs.
pub fn route_length_km(points: &[ItineraryPoint]) -> f64 {
    let positions: Vec<LonLat> = points.iter().map(ItineraryPoint::position).collect();
    positions.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

// -----------------------------------------------------------------------------
// DAY COLORS
// -----------------------------------------------------------------------------

pub const DAY_PALETTE: &[&str] = &[
    "#667eea", "#764ba2", "#10B981", "#0EA5E9", "#F59E0B", "#EF4444", "#14B8A6", "#F472B6",
    "#22C55E", "#06B6D4", "#A78BFA", "#FB923C",
];

/// One color per itinerary day, shared by the map markers and the sidebar.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DayColors {
    colors: BTreeMap<String, String>,
}

impl DayColors {
    pub fn storage_key(itinerary_id: &str) -> String {
        format!("itinerary-day-colors::{itinerary_id}")
    }

    /// Assign colors to every day of `itinerary`.
    ///
    /// Colors already stored for this itinerary are reused and reserved. New
    /// days take the first free palette color in date order, cycling once the
    /// palette runs out. The complete assignment is written back.
    pub fn assign(itinerary: &Itinerary, store: &mut dyn PreferenceStore) -> Self {
        let key = Self::storage_key(&itinerary.id);
        let stored: BTreeMap<String, String> = store
            .get(&key)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(map) => Some(map),
                Err(e) => {
                    warn!(key = %key, error = %e, "ignoring unreadable day colors");
                    None
                }
            })
            .unwrap_or_default();

        let days = day_keys(&itinerary.points);
        let mut used: Vec<String> = days.iter().filter_map(|d| stored.get(*d).cloned()).collect();
        let mut colors = BTreeMap::new();
        let mut fresh = 0usize;
        for date in days {
            let color = match stored.get(date) {
                Some(c) => c.clone(),
                None => {
                    let pick = DAY_PALETTE
                        .iter()
                        .find(|c| !used.iter().any(|u| u == **c))
                        .copied()
                        .unwrap_or(DAY_PALETTE[fresh % DAY_PALETTE.len()]);
                    fresh += 1;
                    used.push(pick.to_string());
                    pick.to_string()
                }
            };
            colors.insert(date.to_string(), color);
        }

        match serde_json::to_string(&colors) {
            Ok(raw) => {
                if let Err(e) = store.set(&key, &raw) {
                    warn!(key = %key, error = %e, "could not persist day colors");
                }
            }
            Err(e) => warn!(key = %key, error = %e, "could not encode day colors"),
        }

        Self { colors }
    }

    pub fn get(&self, date: &str) -> Option<&str> {
        self.colors.get(date).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(d, c)| (d.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

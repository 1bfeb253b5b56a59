// crates/travelmap-core/src/geometry.rs

//! Small numeric helpers: coarse centroids, bounding boxes, great-circle
//! distance and marker jitter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Golden angle in degrees; successive duplicates never line up.
pub const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_86;

/// Base radius of the jitter spiral in degrees (~55 m of latitude).
pub const JITTER_STEP: f64 = 0.0005;

/// A position in GeoJSON order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `[lat, lon]`, the order map polylines expect.
    pub fn to_lat_lng(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

/// Axis-aligned box in degrees, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub const fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    #[inline]
    pub fn contains(&self, p: LonLat) -> bool {
        p.lon >= self.min_lon && p.lon <= self.max_lon && p.lat >= self.min_lat && p.lat <= self.max_lat
    }
}

/// Coarse box around mainland Europe used to pick a country's home
/// territory over its overseas ones.
pub const MAINLAND_EUROPE: BoundingBox = BoundingBox::new(-10.0, 30.0, 35.0, 70.0);

/// Arithmetic mean of every coordinate pair in a nested GeoJSON coordinate
/// array.
///
/// Rings, polygons and multipolygons are flattened uniformly: any array
/// whose first two entries are numbers counts as one point, any other array
/// is descended into. Returns `None` when no point is found, which covers
/// empty, null and malformed input.
///
/// This is not an area-weighted centroid; it is only good enough to tell
/// French Guiana from mainland France.
pub fn centroid(coordinates: &Value) -> Option<LonLat> {
    let mut sum_lon = 0.0;
    let mut sum_lat = 0.0;
    let mut count = 0usize;
    accumulate(coordinates, &mut sum_lon, &mut sum_lat, &mut count);

    if count == 0 {
        return None;
    }
    Some(LonLat::new(sum_lon / count as f64, sum_lat / count as f64))
}

fn accumulate(v: &Value, sum_lon: &mut f64, sum_lat: &mut f64, count: &mut usize) {
    let Value::Array(items) = v else {
        return;
    };
    if let [Value::Number(lon), Value::Number(lat), ..] = items.as_slice() {
        if let (Some(lon), Some(lat)) = (lon.as_f64(), lat.as_f64()) {
            *sum_lon += lon;
            *sum_lat += lat;
            *count += 1;
        }
        return;
    }
    for item in items {
        accumulate(item, sum_lon, sum_lat, count);
    }
}

/// Arithmetic mean of a set of positions.
pub fn mean_position(points: &[LonLat]) -> Option<LonLat> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lon, lat) = points
        .iter()
        .fold((0.0, 0.0), |(lo, la), p| (lo + p.lon, la + p.lat));
    Some(LonLat::new(lon / n, lat / n))
}

/// Great-circle distance in kilometers (haversine).
pub fn haversine_km(a: LonLat, b: LonLat) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Offset of the `k`-th duplicate on the golden-angle spiral.
///
/// `k == 0` is the original position and gets no offset. The longitude
/// component is stretched by `1 / cos(lat)` so the visual radius stays
/// round away from the equator; the stretch is capped near the poles.
pub fn spiral_offset(k: usize, lat: f64) -> (f64, f64) {
    if k == 0 {
        return (0.0, 0.0);
    }
    let angle = (k as f64 * GOLDEN_ANGLE_DEG).to_radians();
    let radius = JITTER_STEP * (k as f64).sqrt();
    let lon_scale = 1.0 / lat.to_radians().cos().abs().max(0.1);
    (radius * angle.cos() * lon_scale, radius * angle.sin())
}

/// Separate markers that share identical coordinates.
///
/// The first point at a given position stays put; each later duplicate is
/// moved to the next slot of a spiral around it. Output has the same length
/// and order as the input, and the result depends only on the input.
pub fn jitter_positions(points: &[LonLat]) -> Vec<LonLat> {
    let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(points.len());

    points
        .iter()
        .map(|p| {
            let slot = seen.entry((p.lon.to_bits(), p.lat.to_bits())).or_insert(0);
            let (d_lon, d_lat) = spiral_offset(*slot, p.lat);
            *slot += 1;
            LonLat::new(p.lon + d_lon, p.lat + d_lat)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn centroid_of_polygon_averages_points() {
        let c = centroid(&json!([[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]])).unwrap();
        assert_eq!(c, LonLat::new(1.0, 1.0));
    }

    #[test]
    fn centroid_flattens_multipolygons() {
        let c = centroid(&json!([[[[0.0, 0.0], [4.0, 0.0]]], [[[4.0, 4.0], [0.0, 4.0]]]])).unwrap();
        assert_eq!(c, LonLat::new(2.0, 2.0));
    }

    #[test]
    fn centroid_rejects_empty_and_malformed() {
        assert_eq!(centroid(&json!([])), None);
        assert_eq!(centroid(&json!([[[]]])), None);
        assert_eq!(centroid(&Value::Null), None);
        assert_eq!(centroid(&json!("polygon")), None);
        assert_eq!(centroid(&json!([["a", "b"]])), None);
    }

    #[test]
    fn centroid_skips_junk_among_points() {
        let c = centroid(&json!([[1.0, 1.0], "x", [3.0, 3.0], [null]])).unwrap();
        assert_eq!(c, LonLat::new(2.0, 2.0));
    }

    #[test]
    fn europe_box_is_inclusive() {
        assert!(MAINLAND_EUROPE.contains(LonLat::new(-10.0, 35.0)));
        assert!(MAINLAND_EUROPE.contains(LonLat::new(30.0, 70.0)));
        assert!(MAINLAND_EUROPE.contains(LonLat::new(2.35, 48.85)));
        assert!(!MAINLAND_EUROPE.contains(LonLat::new(-53.0, 4.0)));
        assert!(!MAINLAND_EUROPE.contains(LonLat::new(55.5, -21.1)));
    }

    #[test]
    fn haversine_berlin_paris() {
        let berlin = LonLat::new(13.4050, 52.5200);
        let paris = LonLat::new(2.3522, 48.8566);
        assert!((haversine_km(berlin, paris) - 878.0).abs() < 10.0);
        assert_eq!(haversine_km(paris, paris), 0.0);
    }

    #[test]
    fn jitter_leaves_unique_points_alone() {
        let pts = [LonLat::new(2.0, 48.0), LonLat::new(19.0, 47.5)];
        assert_eq!(jitter_positions(&pts), pts.to_vec());
    }

    #[test]
    fn jitter_separates_duplicates_deterministically() {
        let p = LonLat::new(19.04, 47.49);
        let pts = [p, p, LonLat::new(0.0, 0.0), p];
        let out = jitter_positions(&pts);

        assert_eq!(out.len(), 4);
        assert_eq!(out[0], p);
        assert_eq!(out[2], LonLat::new(0.0, 0.0));
        assert_ne!(out[1], p);
        assert_ne!(out[3], p);
        assert_ne!(out[1], out[3]);
        assert_eq!(out, jitter_positions(&pts));

        // Stays within a few spiral steps of the original.
        for q in [out[1], out[3]] {
            assert!(haversine_km(p, q) < 0.5);
        }
    }
}

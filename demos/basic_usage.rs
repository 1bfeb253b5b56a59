//! Basic usage example for travelmap-rs
//!
//! This example demonstrates how to:
//! - Resolve visited cities to one country outline per country
//! - Run the fuzzy matcher behind the search box
//! - Spread markers that share coordinates

use serde_json::json;
use travelmap_rs::geometry::centroid;
use travelmap_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== travelmap-rs Basic Usage Example ===\n");

    let features: FeatureCollection = serde_json::from_value(json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "name": "France" },
              "geometry": { "type": "Polygon", "coordinates": [[[-54.5, 2.1], [-51.6, 2.1], [-51.6, 5.8], [-54.5, 5.8]]] } },
            { "type": "Feature", "properties": { "name": "France" },
              "geometry": { "type": "Polygon", "coordinates": [[[-4.8, 42.3], [8.2, 42.3], [8.2, 51.1], [-4.8, 51.1]]] } },
            { "type": "Feature", "properties": { "name": "Czechia" },
              "geometry": { "type": "Polygon", "coordinates": [[[12.1, 48.5], [18.9, 48.5], [18.9, 51.1], [12.1, 51.1]]] } }
        ]
    }))?;

    let visited: VisitedData = serde_json::from_value(json!({
        "visited": [
            { "city": "Paris", "country": "France", "coordinates": [2.3522, 48.8566] },
            { "city": "Nice", "country": "France", "coordinates": [7.262, 43.7102] },
            { "city": "Prague", "country": "Czech Republic", "coordinates": [14.4378, 50.0755] },
            { "city": "Prague Castle", "country": "Czech Republic", "coordinates": [14.4378, 50.0755] },
            { "city": "El Dorado", "country": "Eldorado", "coordinates": [-60.0, 5.0] }
        ]
    }))?;

    // Example 1: Resolve countries
    println!("--- Example 1: Resolve visited countries ---");
    let countries = resolve(&visited.visited, &features.features);
    for c in &countries {
        let center = centroid(c.geojson.coordinates());
        println!(
            "{} → outline '{}' centered at {:?}, {} cities",
            c.name,
            c.geojson.name(),
            center.map(LonLat::to_lat_lng),
            c.cities.len()
        );
    }
    println!("(countries without an outline are dropped)\n");

    // Example 2: Fuzzy search
    println!("--- Example 2: Fuzzy search ---");
    let title = "Budapest Long Weekend";
    for q in ["buda", "Budapset", "long wekend", "vienna"] {
        println!("{title:?} ~ {q:?}: {}", fuzzy_contains(title, q));
    }
    println!();

    // Example 3: Jitter duplicate markers
    println!("--- Example 3: Jitter duplicate markers ---");
    let positions: Vec<LonLat> = visited.visited.iter().map(VisitedCity::position).collect();
    for (city, p) in visited.visited.iter().zip(jitter_positions(&positions)) {
        println!("{:<14} [{:.5}, {:.5}]", city.city, p.lon, p.lat);
    }

    Ok(())
}

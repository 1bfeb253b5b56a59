//! Error handling example for travelmap-rs
//!
//! Business misses (unknown country, non-matching query) are not errors.
//! Only the I/O edges fail, with a [`TravelError`] you can match on.

use travelmap_rs::itinerary::itinerary_filename;
use travelmap_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== travelmap-rs Error Handling Example ===\n");

    // Example 1: Missing data directory
    println!("--- Example 1: Loading from a missing directory ---");
    let src = DataSource::new("/definitely/not/here");
    match src.load_visited() {
        Ok(data) => println!("  Loaded {} cities", data.visited.len()),
        Err(TravelError::NotFound(msg)) => println!("  Not found: {msg}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 2: Broken config
    println!("--- Example 2: Rejected configuration ---");
    for toml in ["[map]\nstyle = \"neon\"", "[map]\nzoom = 30", "data_dir = ["] {
        match Config::from_toml_str(toml) {
            Ok(_) => println!("  accepted: {toml:?}"),
            Err(e) => println!("  rejected: {e}"),
        }
    }
    println!();

    // Example 3: Malformed JSON
    println!("--- Example 3: Malformed feature collection ---");
    match FeatureCollection::from_json_str(r#"{ "features": [ { "properties": {} } ] }"#) {
        Ok(fc) => println!("  Loaded {} features", fc.features.len()),
        Err(e) => println!("  {e}"),
    }
    println!();

    // Example 4: Values that cannot become a file name
    println!("--- Example 4: Itinerary file names ---");
    for (title, date) in [("Budapest Long Weekend", "2024-03-01"), ("Trip", "someday"), ("???", "2024-01-01")] {
        match itinerary_filename(title, date) {
            Ok(name) => println!("  {title:?} → {name}"),
            Err(e) => println!("  {title:?} → {e}"),
        }
    }
    println!();

    // Example 5: Misses are not errors
    println!("--- Example 5: Misses are not errors ---");
    let map = resolve(&[], &[]);
    println!("  Empty input resolves to {} countries", map.len());
    println!("  'Paris' ~ 'Tokyo': {}", fuzzy_contains("Paris", "Tokyo"));

    Ok(())
}

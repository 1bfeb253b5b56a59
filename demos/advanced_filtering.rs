//! Advanced filtering example for travelmap-rs
//!
//! Shows the list filters used by the itinerary and gallery pages:
//! fuzzy query plus exact country/year facets, and the per-trip helpers
//! (metadata, day grouping, day colors, route length).

use serde_json::json;
use travelmap_rs::itinerary::route_length_km;
use travelmap_rs::prelude::*;
use travelmap_rs::search::{itinerary_countries, itinerary_years};

fn main() -> Result<()> {
    println!("=== travelmap-rs Advanced Filtering Example ===\n");

    let trips: Vec<Itinerary> = serde_json::from_value(json!([
        {
            "id": "budapest-2024", "title": "Budapest Long Weekend",
            "startDate": "2024-03-01", "endDate": "2024-03-03",
            "points": [
                { "name": "Parliament", "address": "Kossuth Lajos tér 1-3, Budapest, Hungary",
                  "date": "2024-03-01", "coordinates": [19.0457, 47.5071] },
                { "name": "Széchenyi Baths", "address": "Állatkerti krt. 9-11, Budapest, Hungary",
                  "date": "2024-03-02", "coordinates": [19.0817, 47.5186] }
            ]
        },
        {
            "id": "rome-2023", "title": "Rome and the Vatican",
            "startDate": "2023-10-12", "endDate": "2023-10-14",
            "points": [
                { "name": "Colosseum", "address": "Piazza del Colosseo, Roma, Italy",
                  "date": "2023-10-12", "coordinates": [12.4922, 41.8902] },
                { "name": "St. Peter's Basilica", "address": "Piazza San Pietro, Città del Vaticano",
                  "date": "2023-10-13", "coordinates": [12.4534, 41.9029] }
            ]
        },
        {
            "id": "salzburg-2023", "title": "Christmas Markets",
            "description": "Vienna and Salzburg by train",
            "startDate": "2023-12-20", "endDate": "2023-12-23",
            "points": [
                { "name": "Christkindlmarkt", "address": "Rathausplatz, Wien, Austria",
                  "date": "2023-12-20", "coordinates": [16.3573, 48.2108] }
            ]
        }
    ]))?;
    let trips: Vec<Itinerary> = trips.into_iter().map(travelmap_rs::itinerary::ensure_metadata).collect();

    // Example 1: Facets
    println!("--- Example 1: Facets ---");
    println!("Countries: {:?}", itinerary_countries(&trips));
    println!("Years: {:?}\n", itinerary_years(&trips));

    // Example 2: Query + facets
    println!("--- Example 2: Query + facets ---");
    let filters = [
        RecordFilter::new("salzbrug"),
        RecordFilter::new("vatican"),
        RecordFilter::new("").with_year(2023),
        RecordFilter::new("").with_country("Hungary"),
        RecordFilter::new("markets").with_year(2024),
    ];
    for f in &filters {
        let ids: Vec<&str> = filter_itineraries(&trips, f).iter().map(|t| t.id.as_str()).collect();
        println!("{:<50} → {:?}", format!("{f:?}"), ids);
    }
    println!();

    // Example 3: One trip in detail
    println!("--- Example 3: Trip detail ---");
    let rome = &trips[1];
    let meta = generate_metadata(rome);
    println!("{} {} {:?}", meta.emoji, meta.flags, meta.countries);

    let mut prefs = MemoryStore::new();
    let colors = DayColors::assign(rome, &mut prefs);
    for day in group_points_by_date(&rome.points) {
        let names: Vec<&str> = day.points.iter().map(|p| p.name.as_str()).collect();
        println!("{} {} {:?}", day.date, colors.get(day.date).unwrap_or("-"), names);
    }
    println!("Route: {:.1} km", route_length_km(&rome.points));

    Ok(())
}

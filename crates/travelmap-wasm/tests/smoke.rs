use serde::Serialize;
use serde_json::json;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use travelmap_wasm::{filter_itineraries, fuzzy_contains, jitter, normalize, resolve_countries};

fn js(value: serde_json::Value) -> JsValue {
    value.serialize(&Serializer::json_compatible()).unwrap()
}

#[wasm_bindgen_test]
fn fuzzy_matching_works() {
    #[cfg(target_arch = "wasm32")]
    travelmap_wasm::start();

    assert!(fuzzy_contains("Budapest", "Budapset"));
    assert!(!fuzzy_contains("Paris", "Tokyo"));
    assert_eq!(normalize("Città"), "citta");
}

#[wasm_bindgen_test]
fn resolves_mainland_france() {
    let visited = js(json!([
        { "city": "Paris", "country": "France", "coordinates": [2.35, 48.85] }
    ]));
    let features = js(json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "name": "France" },
              "geometry": { "type": "Polygon", "coordinates": [[[-54, 3], [-52, 3], [-52, 5]]] } },
            { "type": "Feature", "properties": { "name": "France" },
              "geometry": { "type": "Polygon", "coordinates": [[[-4, 43], [7, 43], [7, 50]]] } }
        ]
    }));

    let out: serde_json::Value =
        serde_wasm_bindgen::from_value(resolve_countries(visited, features).unwrap()).unwrap();
    assert_eq!(
        out["France"]["geojson"]["geometry"]["coordinates"][0][0][0].as_f64(),
        Some(-4.0)
    );
    assert_eq!(out["France"]["cities"][0]["city"], "Paris");
}

#[wasm_bindgen_test]
fn filters_itineraries() {
    let list = js(json!([
        { "id": "bud", "title": "Budapest Long Weekend", "startDate": "2024-03-01", "endDate": "2024-03-03" },
        { "id": "rome", "title": "Rome", "startDate": "2023-10-12", "endDate": "2023-10-14" }
    ]));
    let out: serde_json::Value =
        serde_wasm_bindgen::from_value(filter_itineraries(list, "buda", None, None).unwrap()).unwrap();
    assert_eq!(out.as_array().unwrap().len(), 1);
    assert_eq!(out[0]["id"], "bud");
}

#[wasm_bindgen_test]
fn jitter_separates_duplicates() {
    let out: Vec<[f64; 2]> = serde_wasm_bindgen::from_value(
        jitter(js(json!([[19.04, 47.5], [19.04, 47.5], [2.35, 48.85]]))).unwrap(),
    )
    .unwrap();
    assert_eq!(out[0], [19.04, 47.5]);
    assert_ne!(out[1], out[0]);
    assert_eq!(out[2], [2.35, 48.85]);
}

#[wasm_bindgen_test]
fn rejects_unknown_page() {
    assert!(travelmap_wasm::last_query("maps").is_err());
}

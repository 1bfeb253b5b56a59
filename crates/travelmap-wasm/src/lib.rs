//! travelmap-wasm — WebAssembly bindings for travelmap-core
//!
//! The static site fetches its JSON files itself and hands the parsed
//! values to these functions; nothing here does I/O except `localStorage`.
//!
//! What it provides
//! ----------------
//! - Panic hook and a console banner on module load (`#[wasm_bindgen(start)]`)
//! - `resolve_countries(visited, features)`: one outline per visited country
//! - `fuzzy_contains(text, query)` / `normalize(text)`
//! - `filter_itineraries(list, query, country, year)` and
//!   `filter_galleries(...)`, plus `itinerary_countries` / `itinerary_years`
//!   / `gallery_countries` / `gallery_years` for the facet dropdowns
//! - `jitter(points)`: spread markers that share coordinates
//! - `itinerary_metadata(itinerary)` and `day_colors(itinerary)`
//! - `last_query(page)` / `remember_query(page, query)` for the search boxes
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { resolve_countries, filter_itineraries } from 'travelmap-wasm';
//!
//! async function main() {
//!   await init();
//!   const visited = (await (await fetch('/data/visited.json')).json()).visited;
//!   const features = await (await fetch('/countries-features.json')).json();
//!   const countries = resolve_countries(visited, features);
//!   console.log(Object.keys(countries));
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Objects come back as plain JSON-compatible values (objects, not `Map`s).
//! - Malformed input raises a JS exception with the deserialization error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::Serializer;
use travelmap_core::geometry::{jitter_positions, LonLat};
use travelmap_core::itinerary::{generate_metadata, DayColors};
use travelmap_core::prefs::{MemoryStore, PreferenceStore, GALLERIES_LAST_QUERY, ITINERARIES_LAST_QUERY};
use travelmap_core::search::{self, RecordFilter};
use travelmap_core::{FeatureCollection, Gallery, Itinerary, TravelError, VisitedCity};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing travelmap WASM module...".into());
}

/* --------------------------------------------------------------------------
   Conversions
-------------------------------------------------------------------------- */

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn string_array<I, S>(items: I) -> js_sys::Array
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| JsValue::from_str(s.as_ref()))
        .collect()
}

/* --------------------------------------------------------------------------
   Country resolution
-------------------------------------------------------------------------- */

/// `visited` is the `visited` array of `visited.json`; `features` the
/// whole feature collection. Returns `{ [country]: { name, geojson, cities } }`.
#[wasm_bindgen]
pub fn resolve_countries(visited: JsValue, features: JsValue) -> Result<JsValue, JsValue> {
    let cities: Vec<VisitedCity> = from_js(visited)?;
    let collection: FeatureCollection = from_js(features)?;
    let map = travelmap_core::resolve(&cities, &collection.features);
    to_js(&map)
}

/* --------------------------------------------------------------------------
   Search
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn fuzzy_contains(text: &str, query: &str) -> bool {
    travelmap_core::fuzzy_contains(text, query)
}

#[wasm_bindgen]
pub fn normalize(text: &str) -> String {
    travelmap_core::normalize(text)
}

fn filter(query: &str, country: Option<String>, year: Option<i32>) -> RecordFilter {
    let mut f = RecordFilter::new(query);
    if let Some(c) = country {
        f = f.with_country(c);
    }
    if let Some(y) = year {
        f = f.with_year(y);
    }
    f
}

#[wasm_bindgen]
pub fn filter_itineraries(
    list: JsValue,
    query: &str,
    country: Option<String>,
    year: Option<i32>,
) -> Result<JsValue, JsValue> {
    let items: Vec<Itinerary> = from_js(list)?;
    to_js(&search::filter_itineraries(&items, &filter(query, country, year)))
}

#[wasm_bindgen]
pub fn filter_galleries(
    list: JsValue,
    query: &str,
    country: Option<String>,
    year: Option<i32>,
) -> Result<JsValue, JsValue> {
    let items: Vec<Gallery> = from_js(list)?;
    to_js(&search::filter_galleries(&items, &filter(query, country, year)))
}

#[wasm_bindgen]
pub fn itinerary_countries(list: JsValue) -> Result<js_sys::Array, JsValue> {
    let items: Vec<Itinerary> = from_js(list)?;
    Ok(string_array(search::itinerary_countries(&items)))
}

#[wasm_bindgen]
pub fn itinerary_years(list: JsValue) -> Result<Vec<i32>, JsValue> {
    let items: Vec<Itinerary> = from_js(list)?;
    Ok(search::itinerary_years(&items))
}

#[wasm_bindgen]
pub fn gallery_countries(list: JsValue) -> Result<js_sys::Array, JsValue> {
    let items: Vec<Gallery> = from_js(list)?;
    Ok(string_array(search::gallery_countries(&items)))
}

#[wasm_bindgen]
pub fn gallery_years(list: JsValue) -> Result<Vec<i32>, JsValue> {
    let items: Vec<Gallery> = from_js(list)?;
    Ok(search::gallery_years(&items))
}

/* --------------------------------------------------------------------------
   Markers & itineraries
-------------------------------------------------------------------------- */

/// `points` is an array of `[lon, lat]`; returns the same shape.
#[wasm_bindgen]
pub fn jitter(points: JsValue) -> Result<JsValue, JsValue> {
    let raw: Vec<[f64; 2]> = from_js(points)?;
    let input: Vec<LonLat> = raw.iter().map(|p| LonLat::new(p[0], p[1])).collect();
    let out: Vec<[f64; 2]> = jitter_positions(&input)
        .into_iter()
        .map(|p| [p.lon, p.lat])
        .collect();
    to_js(&out)
}

#[wasm_bindgen]
pub fn itinerary_metadata(itinerary: JsValue) -> Result<JsValue, JsValue> {
    let it: Itinerary = from_js(itinerary)?;
    to_js(&generate_metadata(&it))
}

/// `{ [date]: "#rrggbb" }`, stable across reloads via `localStorage`.
#[wasm_bindgen]
pub fn day_colors(itinerary: JsValue) -> Result<JsValue, JsValue> {
    let it: Itinerary = from_js(itinerary)?;
    let mut store = preference_store();
    to_js(&DayColors::assign(&it, store.as_mut()))
}

/* --------------------------------------------------------------------------
   Preferences (localStorage)
-------------------------------------------------------------------------- */

fn query_key(page: &str) -> Result<&'static str, JsValue> {
    match page {
        "itineraries" => Ok(ITINERARIES_LAST_QUERY),
        "galleries" => Ok(GALLERIES_LAST_QUERY),
        other => Err(JsValue::from_str(&format!("unknown page: {other}"))),
    }
}

/// Last query typed on `page` (`"itineraries"` or `"galleries"`).
#[wasm_bindgen]
pub fn last_query(page: &str) -> Result<Option<String>, JsValue> {
    let key = query_key(page)?;
    Ok(travelmap_core::prefs::last_query(preference_store().as_ref(), key))
}

#[wasm_bindgen]
pub fn remember_query(page: &str, query: &str) -> Result<(), JsValue> {
    let key = query_key(page)?;
    travelmap_core::prefs::remember_query(preference_store().as_mut(), key, query);
    Ok(())
}

/// `localStorage`-backed store.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// `None` outside a browser window or when storage is disabled.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> travelmap_core::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|_| TravelError::InvalidData(format!("localStorage rejected {key}")))
    }

    fn remove(&mut self, key: &str) -> travelmap_core::Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|_| TravelError::InvalidData(format!("localStorage rejected removal of {key}")))
    }
}

fn preference_store() -> Box<dyn PreferenceStore> {
    #[cfg(target_arch = "wasm32")]
    if let Some(ls) = LocalStorage::open() {
        return Box::new(ls);
    }
    Box::new(MemoryStore::new())
}

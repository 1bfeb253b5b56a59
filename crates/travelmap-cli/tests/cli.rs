use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "countries-features.json",
        r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": { "name": "Hungary" },
              "geometry": { "type": "Polygon", "coordinates": [[[16, 46], [22, 46], [22, 48.5], [16, 48.5]]] } }
        ] }"#,
    );
    write(
        root,
        "data/visited.json",
        r#"{ "visited": [
            { "city": "Budapest", "country": "Hungary", "coordinates": [19.04, 47.50] },
            { "city": "Atlantis", "country": "Atlantis", "coordinates": [0, 0] }
        ] }"#,
    );
    write(
        root,
        "data/itineraries/index.json",
        r#"{ "itineraries": [
            { "id": "bud", "title": "Budapest Long Weekend", "startDate": "2024-03-01",
              "endDate": "2024-03-03", "file": "2024/bud.json" }
        ] }"#,
    );
    write(
        root,
        "data/itineraries/2024/bud.json",
        r#"{ "id": "bud", "title": "Budapest Long Weekend", "startDate": "2024-03-01", "endDate": "2024-03-03",
             "points": [
               { "name": "Parliament", "address": "Kossuth tér, Budapest, Hungary", "date": "2024-03-01", "coordinates": [19.0457, 47.5071] },
               { "name": "Baths", "address": "Állatkerti krt., Budapest, Hungary", "date": "2024-03-02", "coordinates": [19.0817, 47.5186] }
             ] }"#,
    );
    dir
}

fn travelmap(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_travelmap"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("TRAVELMAP_CONFIG")
        .env_remove("TRAVELMAP_PREFS")
        .current_dir(data_dir)
        .output()
        .expect("failed to run travelmap")
}

#[test]
fn countries_reports_missing_outlines() {
    let dir = site();
    let out = travelmap(dir.path(), &["countries"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains("Hungary"));
    assert!(stderr.contains("No outline found for: Atlantis"));
}

#[test]
fn itinerary_search_is_fuzzy() {
    let dir = site();
    let out = travelmap(dir.path(), &["itineraries", "budapset"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Budapest Long Weekend"));

    let out = travelmap(dir.path(), &["--format", "json", "itineraries", "tokyo"]);
    let hits: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(hits.as_array().map(Vec::len), Some(0));
}

#[test]
fn remembers_last_query() {
    let dir = site();
    let prefs = dir.path().join("prefs.json");
    let prefs = prefs.to_str().unwrap();

    travelmap(dir.path(), &["--prefs", prefs, "itineraries", "buda"]);
    let out = travelmap(dir.path(), &["--prefs", prefs, "--format", "json", "itineraries", "--last"]);
    let hits: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(hits[0]["id"], "bud");
}

#[test]
fn validate_passes_clean_data() {
    let dir = site();
    let out = travelmap(dir.path(), &["validate"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("0 errors, 0 warnings"));
}

#[test]
fn validate_fails_on_unreadable_file() {
    let dir = site();
    write(dir.path(), "data/itineraries/2024/broken.json", "{ nope");
    let out = travelmap(dir.path(), &["validate"]);
    assert!(!out.status.success());
}

#[test]
fn validate_reports_bad_point_without_dropping_the_file() {
    let dir = site();
    write(
        dir.path(),
        "data/itineraries/2024/rome.json",
        r#"{ "id": "rome", "title": "Rome", "startDate": "2024-05-01", "endDate": "2024-05-02",
             "points": [
               { "name": "Colosseum", "address": "Rome, Italy", "date": "2024-05-01", "coordinates": [12.4922, 41.8902] },
               { "name": "Pantheon", "address": "Rome, Italy", "date": "2024-05-01", "coordinates": ["12.47", 41.89] },
               { "name": "Flipped", "address": "Rome, Italy", "date": "2024-05-02", "coordinates": [41.9, 12.5] }
             ] }"#,
    );
    let out = travelmap(dir.path(), &["validate"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[1] Pantheon: non-numeric coordinates"), "{stderr}");
    assert!(stderr.contains("Flipped: far from centroid"), "{stderr}");
    assert!(!stderr.contains("rome.json:"), "{stderr}");
}

#[test]
fn validate_json_is_keyed_by_file() {
    let dir = site();
    write(
        dir.path(),
        "data/itineraries/2023/swap.json",
        r#"{ "id": "swap", "title": "Swap", "startDate": "2023-06-01", "endDate": "2023-06-01",
             "points": [
               { "name": "Ok", "address": "Vienna, Austria", "date": "2023-06-01", "coordinates": [16.37, 48.21] },
               { "name": "Swapped", "address": "Vienna, Austria", "date": "2023-06-01", "coordinates": [48.21, 196.37] }
             ] }"#,
    );
    write(dir.path(), "data/itineraries/2024/broken.json", "{ nope");

    let out = travelmap(dir.path(), &["--format", "json", "validate", "--max-km", "50000"]);
    assert!(!out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();

    let files = report["files"].as_array().unwrap();
    let swap = files
        .iter()
        .find(|f| f["file"].as_str().is_some_and(|n| n.ends_with("swap.json")))
        .unwrap();
    assert_eq!(swap["warnings"][0]["kind"], "out_of_range");
    assert_eq!(swap["warnings"][0]["name"], "Swapped");

    let unreadable = report["unreadable"].as_array().unwrap();
    assert_eq!(unreadable.len(), 1);
    assert!(unreadable[0]["file"].as_str().unwrap().ends_with("broken.json"));
    assert_eq!(report["errors"], 1);
    assert_eq!(report["warnings"], 1);
}

#[test]
fn filename_command() {
    let dir = site();
    let out = travelmap(dir.path(), &["filename", "Rome & the Vatican", "2023-10-12"]);
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "2023/rome-the-vatican.json");
}

//! travelmap — command-line interface for travelmap-core
//!
//! Reads the static JSON files behind the travel-journal site and answers
//! the questions the site answers in the browser: which country outline
//! belongs to each visited country, which trips match a search, what a
//! single trip looks like day by day. It also checks itinerary coordinates
//! before they are published.
//!
//! Usage examples
//! --------------
//!
//! - Overall counts
//!   $ travelmap stats
//!
//! - Resolved countries and the ones with no outline
//!   $ travelmap --data-dir site/public countries
//!
//! - Fuzzy search with facets
//!   $ travelmap itineraries "salzbrug" --year 2023
//!   $ travelmap galleries --country Portugal
//!
//! - One itinerary, or all of them validated
//!   $ travelmap itinerary rome-2023
//!   $ travelmap validate
//!
//! Configuration
//! -------------
//!
//! Paths default to the site layout under `public/`. A `travelmap.toml`
//! (or `--config <file>`) can override them; `--data-dir` overrides the
//! root. `RUST_LOG` controls log output, `--verbose` forces debug level.
mod args;

use crate::args::{CliArgs, Commands, OutputFormat, SearchArgs};
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use travelmap_core::itinerary::{
    group_points_by_date, itinerary_filename, route_length_km, DayColors,
};
use travelmap_core::loader::{read_json, DataSource};
use travelmap_core::prefs::{
    last_query, remember_query, JsonFileStore, MemoryStore, PreferenceStore,
    GALLERIES_LAST_QUERY, ITINERARIES_LAST_QUERY,
};
use travelmap_core::resolve::{resolve, unmatched_countries};
use travelmap_core::search::{filter_galleries, filter_itineraries, RecordFilter};
use travelmap_core::validate::{validate_document, ValidationReport};
use travelmap_core::{geometry, Config, TravelError, TravelStats};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = args.data_dir.clone() {
        config = config.with_data_dir(dir);
    }
    debug!(data_dir = %config.data_dir.display(), source = ?config.source, "configuration ready");

    let src = DataSource::from_config(&config);
    let mut prefs: Box<dyn PreferenceStore> = match &args.prefs {
        Some(path) => Box::new(JsonFileStore::open(path).context("opening preference file")?),
        None => Box::new(MemoryStore::new()),
    };
    let format = args.format;

    match args.command {
        Commands::Stats => {
            let visited = src.load_visited()?.visited;
            let features = src.load_features()?;
            let countries = resolve(&visited, &features.features);
            let itineraries = optional(src.load_itineraries())?;
            let galleries = optional(src.load_galleries())?;
            let stats = TravelStats::collect(&visited, &countries, &itineraries, &galleries);

            if format == OutputFormat::Json {
                return print_json(&stats);
            }
            println!("Travel statistics:");
            println!("  Cities: {}", stats.cities);
            println!("  Countries: {}", stats.countries);
            println!("  Photos: {}", stats.photos);
            println!("  Itineraries: {} ({} points)", stats.itineraries, stats.itinerary_points);
            println!("  Galleries: {}", stats.galleries);
        }

        #[cfg(not(feature = "fetch"))]
        Commands::Countries {} => countries(&src, None, format)?,

        #[cfg(feature = "fetch")]
        Commands::Countries { url } => countries(&src, url.as_deref(), format)?,

        Commands::Itineraries(search) => {
            let filter = search_filter(&search, prefs.as_mut(), ITINERARIES_LAST_QUERY);
            let all = src.load_itineraries()?;
            let hits = filter_itineraries(&all, &filter);

            if format == OutputFormat::Json {
                return print_json(&hits);
            }
            if hits.is_empty() {
                println!("No itineraries found matching: {}", filter.query);
            }
            for it in hits {
                let flags = it.metadata.as_ref().map(|m| m.flags.as_str()).unwrap_or("");
                println!("{:<24} {} → {}  {}  {}", it.id, it.start_date, it.end_date, flags, it.title);
            }
        }

        Commands::Galleries(search) => {
            let filter = search_filter(&search, prefs.as_mut(), GALLERIES_LAST_QUERY);
            let all = src.load_galleries()?;
            let hits = filter_galleries(&all, &filter);

            if format == OutputFormat::Json {
                return print_json(&hits);
            }
            if hits.is_empty() {
                println!("No galleries found matching: {}", filter.query);
            }
            for g in hits {
                let place = match (g.city(), g.country()) {
                    (Some(city), Some(country)) => format!("{city}, {country}"),
                    (None, Some(country)) => country.to_string(),
                    (Some(city), None) => city.to_string(),
                    (None, None) => "-".to_string(),
                };
                let year = g.year.map(|y| y.to_string()).unwrap_or_default();
                println!("{:<20} {:<4} {:>3} photos  {}  ({place})", g.id, year, g.photos.len(), g.title);
            }
        }

        Commands::Itinerary { id } => {
            let it = src.load_itinerary(&id)?;
            let colors = DayColors::assign(&it, prefs.as_mut());
            let km = route_length_km(&it.points);

            if format == OutputFormat::Json {
                #[derive(Serialize)]
                struct View<'a> {
                    itinerary: &'a travelmap_core::Itinerary,
                    day_colors: &'a DayColors,
                    route_km: f64,
                }
                return print_json(&View {
                    itinerary: &it,
                    day_colors: &colors,
                    route_km: km,
                });
            }

            println!("{} ({})", it.title, it.id);
            println!("Dates: {} → {}", it.start_date, it.end_date);
            if let Some(m) = &it.metadata {
                println!("Countries: {} {}", m.flags, m.countries.join(", "));
            }
            println!("Route: {km:.1} km over {} points", it.points.len());
            for day in group_points_by_date(&it.points) {
                println!();
                println!("{} [{}]", day.date, colors.get(day.date).unwrap_or("-"));
                for p in day.points {
                    println!("  - {} — {}", p.name, p.address);
                }
            }
        }

        Commands::Validate { max_km } => {
            let max_km = max_km.unwrap_or(config.validation.max_centroid_distance_km);
            validate_all(&src, max_km, format)?;
        }

        Commands::Filename { title, start_date } => {
            println!("{}", itinerary_filename(&title, &start_date)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A collection whose index is missing is treated as empty.
fn optional<T: Default>(r: travelmap_core::Result<T>) -> Result<T> {
    match r {
        Ok(v) => Ok(v),
        Err(TravelError::NotFound(msg)) => {
            warn!("{msg}");
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn search_filter(args: &SearchArgs, prefs: &mut dyn PreferenceStore, key: &str) -> RecordFilter {
    let query = if args.last {
        last_query(prefs, key).unwrap_or_default()
    } else {
        let q = args.query.clone().unwrap_or_default();
        remember_query(prefs, key, &q);
        q
    };

    let mut filter = RecordFilter::new(query);
    if let Some(c) = &args.country {
        filter = filter.with_country(c.as_str());
    }
    if let Some(y) = args.year {
        filter = filter.with_year(y);
    }
    filter
}

fn countries(src: &DataSource, url: Option<&str>, format: OutputFormat) -> Result<()> {
    let visited = src.load_visited()?.visited;
    let features = match url {
        #[cfg(feature = "fetch")]
        Some(url) => travelmap_core::FeatureCollection::fetch(url)?,
        #[cfg(not(feature = "fetch"))]
        Some(_) => bail!("downloading features requires the `fetch` feature"),
        None => src.load_features()?,
    };

    let resolved = resolve(&visited, &features.features);
    let missing = unmatched_countries(&visited, &resolved);

    if format == OutputFormat::Json {
        return print_json(&resolved);
    }

    for c in &resolved {
        let center = geometry::centroid(c.geojson.coordinates())
            .map(|p| format!("({:.3}, {:.3})", p.lat, p.lon))
            .unwrap_or_else(|| "(no centroid)".to_string());
        println!(
            "{:<24} {:>3} cities  {:<13} {center}",
            c.name,
            c.cities.len(),
            c.geojson.geometry_type()
        );
    }
    for name in &missing {
        eprintln!("No outline found for: {name}");
    }
    Ok(())
}

/// Validation result of one itinerary file, keyed by its path under the
/// itineraries directory.
#[derive(Serialize)]
struct FileReport {
    file: String,
    #[serde(flatten)]
    report: ValidationReport,
}

#[derive(Serialize)]
struct UnreadableFile {
    file: String,
    error: String,
}

#[derive(Serialize, Default)]
struct ValidationSummary {
    files: Vec<FileReport>,
    unreadable: Vec<UnreadableFile>,
    errors: usize,
    warnings: usize,
}

fn validate_all(src: &DataSource, max_km: f64, format: OutputFormat) -> Result<()> {
    let files = src.discover_itinerary_files();
    if files.is_empty() {
        bail!("no itinerary files under {}", src.itineraries.display());
    }

    let mut summary = ValidationSummary::default();

    for path in &files {
        let label = path
            .strip_prefix(&src.itineraries)
            .unwrap_or(path)
            .display()
            .to_string();

        let report = read_json::<serde_json::Value>(path)
            .and_then(|doc| validate_document(&doc, max_km));
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                if format == OutputFormat::Text {
                    eprintln!("ERROR: {label}: {e}");
                }
                summary.unreadable.push(UnreadableFile {
                    file: label,
                    error: e.to_string(),
                });
                summary.errors += 1;
                continue;
            }
        };
        if format == OutputFormat::Text {
            for e in &report.errors {
                eprintln!("ERROR: {label} {e}");
            }
            for w in &report.warnings {
                eprintln!("WARN : {label} {w}");
            }
        }
        summary.errors += report.errors.len();
        summary.warnings += report.warnings.len();
        summary.files.push(FileReport {
            file: label,
            report,
        });
    }

    if format == OutputFormat::Json {
        print_json(&summary)?;
    } else {
        println!();
        println!("Summary: {} errors, {} warnings", summary.errors, summary.warnings);
    }

    if summary.errors > 0 {
        bail!("{} itinerary errors", summary.errors);
    }
    Ok(())
}

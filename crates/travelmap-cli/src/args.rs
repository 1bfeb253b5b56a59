use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for travelmap
#[derive(Debug, Parser)]
#[command(
    name = "travelmap",
    version,
    about = "Inspect, search and validate the data behind a travel-journal map"
)]
pub struct CliArgs {
    /// Path to a travelmap.toml (default: first of travelmap.toml, .travelmap.toml, .config/travelmap.toml)
    #[arg(short = 'c', long = "config", global = true, env = "TRAVELMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the site's static files (overrides `data_dir` from the config)
    #[arg(short = 'd', long = "data-dir", global = true, env = "TRAVELMAP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// JSON file used to remember queries and day colors between runs
    #[arg(long = "prefs", global = true, env = "TRAVELMAP_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show counts of cities, countries, itineraries and galleries
    Stats,

    /// Resolve visited cities to one country outline each
    Countries {
        /// Download the feature collection instead of reading it from disk
        #[cfg(feature = "fetch")]
        #[arg(long = "url")]
        url: Option<String>,
    },

    /// Search itineraries (fuzzy, accent-insensitive)
    Itineraries(SearchArgs),

    /// Search photo galleries (fuzzy, accent-insensitive)
    Galleries(SearchArgs),

    /// Show one itinerary: metadata, days and route length
    Itinerary {
        /// Itinerary id as listed in the index
        id: String,
    },

    /// Check itinerary coordinates for swaps and strays
    Validate {
        /// Maximum distance from an itinerary's centroid before warning (km)
        #[arg(long = "max-km")]
        max_km: Option<f64>,
    },

    /// Print the relative file name for a new itinerary
    Filename {
        /// Itinerary title
        title: String,
        /// Start date (YYYY-MM-DD)
        start_date: String,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search text; omit to list everything (or reuse the last query with --last)
    pub query: Option<String>,

    /// Only records in this country (exact name)
    #[arg(long = "country")]
    pub country: Option<String>,

    /// Only records from this year
    #[arg(long = "year")]
    pub year: Option<i32>,

    /// Reuse the last query remembered in --prefs
    #[arg(long = "last", conflicts_with = "query")]
    pub last: bool,
}

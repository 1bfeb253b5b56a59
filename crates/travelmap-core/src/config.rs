// crates/travelmap-core/src/config.rs

//! Configuration file loading.
//!
//! Every field has a default matching the layout of the static site
//! (`public/data/...`), so running without a config file works out of the box.

use crate::error::{Result, TravelError};
use crate::validate::DEFAULT_MAX_CENTROID_DISTANCE_KM;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Searched in this order, relative to the working directory.
pub const CONFIG_CANDIDATES: &[&str] = &["travelmap.toml", ".travelmap.toml", ".config/travelmap.toml"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the site's static files; relative paths below resolve here.
    pub data_dir: PathBuf,
    pub visited_file: PathBuf,
    pub features_file: PathBuf,
    pub itineraries_dir: PathBuf,
    pub galleries_dir: PathBuf,
    pub map: MapConfig,
    pub validation: ValidationConfig,
    /// File this config was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("public"),
            visited_file: PathBuf::from("data/visited.json"),
            features_file: PathBuf::from("countries-features.json"),
            itineraries_dir: PathBuf::from("data/itineraries"),
            galleries_dir: PathBuf::from("data/galleries"),
            map: MapConfig::default(),
            validation: ValidationConfig::default(),
            source: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub style: String,
    pub color_scheme: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [48.8566, 2.3522],
            zoom: 5,
            min_zoom: 2,
            max_zoom: 18,
            style: "light".to_string(),
            color_scheme: "green".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub max_centroid_distance_km: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_centroid_distance_km: DEFAULT_MAX_CENTROID_DISTANCE_KM,
        }
    }
}

impl Config {
    /// Load from `path`, or from the first file in [`CONFIG_CANDIDATES`],
    /// or fall back to defaults.
    ///
    /// An explicit path that cannot be read is an error; a missing candidate
    /// is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match find_config_file(Path::new(".")) {
                Some(p) => Self::from_file(&p),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TravelError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            TravelError::Config(msg) => TravelError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TravelError::Config(format!("Failed to parse config: {e}")))?;
        config.check()?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Reject values the map cannot use.
    pub fn check(&self) -> Result<()> {
        let m = &self.map;
        if m.min_zoom > m.max_zoom || m.zoom < m.min_zoom || m.zoom > m.max_zoom {
            return Err(TravelError::Config(format!(
                "zoom {} must lie within {}..={}",
                m.zoom, m.min_zoom, m.max_zoom
            )));
        }
        if map_style(&m.style).is_none() {
            return Err(TravelError::Config(format!("unknown map style: {}", m.style)));
        }
        if color_scheme(&m.color_scheme).is_none() {
            return Err(TravelError::Config(format!("unknown color scheme: {}", m.color_scheme)));
        }
        let max_km = self.validation.max_centroid_distance_km;
        if max_km.is_nan() || max_km <= 0.0 {
            return Err(TravelError::Config(
                "max_centroid_distance_km must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn under_data_dir(&self, p: &Path) -> PathBuf {
        self.data_dir.join(p)
    }

    pub fn visited_path(&self) -> PathBuf {
        self.under_data_dir(&self.visited_file)
    }

    pub fn features_path(&self) -> PathBuf {
        self.under_data_dir(&self.features_file)
    }

    pub fn itineraries_path(&self) -> PathBuf {
        self.under_data_dir(&self.itineraries_dir)
    }

    pub fn galleries_path(&self) -> PathBuf {
        self.under_data_dir(&self.galleries_dir)
    }
}

/// First existing entry of [`CONFIG_CANDIDATES`] under `dir`.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|c| dir.join(c))
        .find(|p| p.is_file())
}

// -----------------------------------------------------------------------------
// MAP STYLES & COLOR SCHEMES
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MapStyle {
    pub key: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
}

pub const MAP_STYLES: &[MapStyle] = &[
    MapStyle {
        key: "standard",
        name: "Standard",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "© OpenStreetMap contributors",
    },
    MapStyle {
        key: "dark",
        name: "Dark",
        url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: "© CartoDB",
    },
    MapStyle {
        key: "light",
        name: "Light",
        url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        attribution: "© CartoDB",
    },
    MapStyle {
        key: "satellite",
        name: "Satellite",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "© Esri",
    },
    MapStyle {
        key: "terrain",
        name: "Terrain",
        url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "© OpenTopoMap",
    },
    MapStyle {
        key: "vintage",
        name: "Vintage",
        url: "https://{s}.tile.stamen.com/watercolor/{z}/{x}/{y}.jpg",
        attribution: "© Stamen Design",
    },
];

/// Colors for country outlines and city markers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub key: &'static str,
    pub name: &'static str,
    pub country_border: &'static str,
    pub country_fill: &'static str,
    pub country_fill_opacity: f32,
    pub city_border: &'static str,
    pub city_fill: &'static str,
    pub city_fill_opacity: f32,
}

const fn scheme(
    key: &'static str,
    name: &'static str,
    country: (&'static str, &'static str),
    city: (&'static str, &'static str),
) -> ColorScheme {
    ColorScheme {
        key,
        name,
        country_border: country.0,
        country_fill: country.1,
        country_fill_opacity: 0.08,
        city_border: city.0,
        city_fill: city.1,
        city_fill_opacity: 0.9,
    }
}

pub const COLOR_SCHEMES: &[ColorScheme] = &[
    scheme("green", "Green", ("#059669", "#10B981"), ("#DC2626", "#EF4444")),
    scheme("blue", "Blue", ("#1E40AF", "#3B82F6"), ("#DC2626", "#EF4444")),
    scheme("purple", "Purple", ("#7C3AED", "#8B5CF6"), ("#F59E0B", "#FBBF24")),
    scheme("orange", "Orange", ("#EA580C", "#F97316"), ("#059669", "#10B981")),
    scheme("red", "Red", ("#DC2626", "#EF4444"), ("#059669", "#10B981")),
    scheme("teal", "Teal", ("#0F766E", "#14B8A6"), ("#DC2626", "#EF4444")),
];

pub fn map_style(key: &str) -> Option<&'static MapStyle> {
    MAP_STYLES.iter().find(|s| s.key == key)
}

pub fn color_scheme(key: &str) -> Option<&'static ColorScheme> {
    COLOR_SCHEMES.iter().find(|s| s.key == key)
}

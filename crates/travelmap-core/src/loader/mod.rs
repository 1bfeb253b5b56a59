// crates/travelmap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Reads the site's static JSON files from disk. Transport (files, gzip)
//! lives in `common_io`; this module knows the layout:
//!
//! ```text
//! <data_dir>/countries-features.json[.gz]
//! <data_dir>/data/visited.json
//! <data_dir>/data/itineraries/index.json   -> "file" entries relative to it
//! <data_dir>/data/galleries/index.json     -> "file" entries relative to it
//! ```
//!
//! Collections load through their index. A missing or broken index is an
//! error; a single broken record file is logged and skipped so one typo
//! does not take the whole list down.

use crate::config::Config;
use crate::error::{Result, TravelError};
use crate::itinerary::ensure_metadata;
use crate::model::{
    FeatureCollection, Gallery, GalleryIndex, Itinerary, ItineraryIndex, VisitedData,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

mod common_io;
#[cfg(feature = "fetch")]
mod fetch;

pub use common_io::{is_gzip, open_stream, read_json};

pub const INDEX_FILE: &str = "index.json";

impl FeatureCollection {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl VisitedData {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }
}

impl Itinerary {
    /// Load one itinerary file, generating metadata if it has none.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref()).map(ensure_metadata)
    }
}

impl Gallery {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }
}

/// Paths of every data file, resolved from a [`Config`].
#[derive(Clone, Debug, PartialEq)]
pub struct DataSource {
    pub visited: PathBuf,
    pub features: PathBuf,
    pub itineraries: PathBuf,
    pub galleries: PathBuf,
}

impl DataSource {
    /// Default layout under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&Config::default().with_data_dir(data_dir))
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            visited: config.visited_path(),
            features: config.features_path(),
            itineraries: config.itineraries_path(),
            galleries: config.galleries_path(),
        }
    }

    /// The feature file, or its `.gz` sibling when only that exists.
    pub fn features_file(&self) -> PathBuf {
        if self.features.exists() || is_gzip(&self.features) {
            return self.features.clone();
        }
        let mut gz = self.features.clone().into_os_string();
        gz.push(".gz");
        let gz = PathBuf::from(gz);
        if gz.exists() {
            gz
        } else {
            self.features.clone()
        }
    }

    pub fn load_features(&self) -> Result<FeatureCollection> {
        let path = self.features_file();
        let fc = FeatureCollection::load_from_path(&path)?;
        debug!(path = %path.display(), features = fc.features.len(), "loaded country features");
        Ok(fc)
    }

    pub fn load_visited(&self) -> Result<VisitedData> {
        let data = VisitedData::load_from_path(&self.visited)?;
        debug!(path = %self.visited.display(), cities = data.visited.len(), "loaded visited cities");
        Ok(data)
    }

    // ---- ITINERARIES ----

    pub fn load_itinerary_index(&self) -> Result<ItineraryIndex> {
        read_json(&self.itineraries.join(INDEX_FILE))
    }

    /// Every itinerary listed in the index, in index order.
    pub fn load_itineraries(&self) -> Result<Vec<Itinerary>> {
        let index = self.load_itinerary_index()?;
        Ok(load_listed(
            &self.itineraries,
            index.itineraries.iter().map(|e| e.file.as_str()),
            Itinerary::load_from_path,
        ))
    }

    /// Look up `id` in the index and load its file.
    pub fn load_itinerary(&self, id: &str) -> Result<Itinerary> {
        let index = self.load_itinerary_index()?;
        let entry = index
            .itineraries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| TravelError::NotFound(format!("itinerary {id:?} is not in the index")))?;
        Itinerary::load_from_path(self.itineraries.join(&entry.file))
    }

    /// Itinerary files on disk, whether indexed or not. Sorted.
    pub fn discover_itinerary_files(&self) -> Vec<PathBuf> {
        discover_json(&self.itineraries)
    }

    // ---- GALLERIES ----

    pub fn load_gallery_index(&self) -> Result<GalleryIndex> {
        read_json(&self.galleries.join(INDEX_FILE))
    }

    pub fn load_galleries(&self) -> Result<Vec<Gallery>> {
        let index = self.load_gallery_index()?;
        Ok(load_listed(
            &self.galleries,
            index.galleries.iter().map(|e| e.file.as_str()),
            Gallery::load_from_path,
        ))
    }

    pub fn load_gallery(&self, id: &str) -> Result<Gallery> {
        let index = self.load_gallery_index()?;
        let entry = index
            .galleries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| TravelError::NotFound(format!("gallery {id:?} is not in the index")))?;
        Gallery::load_from_path(self.galleries.join(&entry.file))
    }
}

fn load_listed<'a, T, F>(base: &Path, files: impl Iterator<Item = &'a str>, load: F) -> Vec<T>
where
    F: Fn(PathBuf) -> Result<T>,
{
    files
        .filter_map(|file| {
            let path = base.join(file);
            match load(path) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(file, error = %e, "skipping unreadable record");
                    None
                }
            }
        })
        .collect()
}

fn discover_json(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(error = %e, "cannot read directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension().is_some_and(|ext| ext == "json")
                && p.file_name().is_some_and(|n| n != INDEX_FILE)
        })
        .collect();
    files.sort();
    files
}

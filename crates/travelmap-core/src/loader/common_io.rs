// crates/travelmap-core/src/loader/common_io.rs
use crate::error::{Result, TravelError};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

pub fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Open `path` for reading, gunzipping `.gz` files.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TravelError::NotFound(format!("{} not found: {}", path.display(), e))
        } else {
            TravelError::Io(e)
        }
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }

        #[cfg(not(feature = "compact"))]
        {
            return Err(TravelError::InvalidData(format!(
                "{} is gzip-compressed; enable the `compact` feature",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = open_stream(path)?;
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            TravelError::Io(e.into())
        } else {
            TravelError::Json(e)
        }
    })
}

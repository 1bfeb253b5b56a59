// crates/travelmap-core/src/loader/fetch.rs
use crate::error::{Result, TravelError};
use crate::model::FeatureCollection;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("travelmap/", env!("CARGO_PKG_VERSION"));

impl FeatureCollection {
    /// Download a feature collection over HTTP(S).
    ///
    /// URLs ending in `.gz` are gunzipped (requires `compact`).
    pub fn fetch(url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| TravelError::Fetch(format!("client setup failed: {e}")))?;

        let response = client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| TravelError::Fetch(format!("GET {url} failed: {e}")))?;

        let body = response
            .bytes()
            .map_err(|e| TravelError::Fetch(format!("reading {url} failed: {e}")))?;
        debug!(url, bytes = body.len(), "downloaded feature collection");

        if url.ends_with(".gz") {
            #[cfg(feature = "compact")]
            {
                use std::io::Read;
                let mut raw = Vec::new();
                flate2::read::GzDecoder::new(&body[..]).read_to_end(&mut raw)?;
                return Ok(serde_json::from_slice(&raw)?);
            }

            #[cfg(not(feature = "compact"))]
            {
                return Err(TravelError::InvalidData(format!(
                    "{url} is gzip-compressed; enable the `compact` feature"
                )));
            }
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

//! Dataset loading with fallback support.
//!
//! The production flow is: fetch the external CSV, decode it, derive
//! metadata. On any fetch failure the loader logs a warning and
//! substitutes the embedded sample dataset instead of surfacing an
//! error. There is no retry and no timeout policy.

mod fallback;

pub use fallback::{fallback_dataset, fallback_records, FALLBACK_DATA_SOURCE};

use std::path::Path;

use crate::decoder;
use crate::error::{DecodeResult, FetchError, FetchResult};
use crate::logs::{log_success, log_warning};
use crate::models::{Dataset, Record};

/// Environment variable overriding the default dataset URL.
pub const DATA_URL_ENV: &str = "WORKMAP_DATA_URL";

/// Published dataset fetched when no override is configured.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/workmap/workmap/main/data/job_data.csv";

/// Fetch and decode an external dataset.
///
/// A non-success HTTP status is a fetch failure; decoding itself cannot
/// fail.
pub async fn fetch_records(url: &str) -> FetchResult<Vec<Record>> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    Ok(decoder::decode(&body))
}

/// Load the dataset from `url`, falling back to the embedded sample on
/// any failure. The failure is logged, never surfaced.
pub async fn load(url: &str) -> Dataset {
    match fetch_records(url).await {
        Ok(records) => {
            log_success(format!("Loaded {} records from {}", records.len(), url));
            Dataset::new(records, url)
        }
        Err(err) => {
            log_warning(format!(
                "External data loading failed, using fallback data: {err}"
            ));
            fallback_dataset()
        }
    }
}

/// Load a dataset from a local file.
pub async fn load_file<P: AsRef<Path>>(path: P) -> DecodeResult<Dataset> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let records = decoder::decode_bytes(&bytes);
    Ok(Dataset::new(records, path.display().to_string()))
}

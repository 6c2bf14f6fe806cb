//! Remote sheet fetch.
//!
//! # Responsibility
//! - Fetch the nested sheet JSON from the public question-tracker endpoint
//!   and hand it to the nested-shape normalizer.
//!
//! # Invariants
//! - One attempt, fail-fast: no retries, no partial data on failure.
//! - Non-2xx responses and transport errors surface as [`FetchError`].

use crate::model::sheet::Topic;
use crate::normalize::nested::{normalize_nested, RawTopic};
use log::{error, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Public endpoint serving the default sheet.
pub const DEFAULT_SHEET_URL: &str =
    "https://node.codolio.com/api/question-tracker/v1/sheet/public/get-sheet-by-slug/striver-sde-sheet";

/// Errors from the remote fetch.
#[derive(Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, read).
    Transport(reqwest::Error),
    /// The endpoint answered with a non-success status.
    Status(reqwest::StatusCode),
    /// The response body is not the expected envelope.
    Decode(reqwest::Error),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "sheet fetch failed: {err}"),
            Self::Status(status) => write!(f, "sheet fetch failed: status {status}"),
            Self::Decode(err) => write!(f, "sheet response not decodable: {err}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) | Self::Decode(err) => Some(err),
            Self::Status(_) => None,
        }
    }
}

// Response envelope: { "data": { "sheet": { "topics": [...] } } }.
#[derive(Debug, Deserialize)]
struct SheetEnvelope {
    data: SheetData,
}

#[derive(Debug, Deserialize)]
struct SheetData {
    sheet: SheetBody,
}

#[derive(Debug, Deserialize)]
struct SheetBody {
    #[serde(default)]
    topics: Vec<RawTopic>,
}

/// Fetches and normalizes the default public sheet.
pub fn fetch_default_sheet() -> Result<Vec<Topic>, FetchError> {
    fetch_sheet(DEFAULT_SHEET_URL)
}

/// Fetches the nested sheet JSON from `url` and normalizes it.
pub fn fetch_sheet(url: &str) -> Result<Vec<Topic>, FetchError> {
    let started_at = Instant::now();
    info!("event=sheet_fetch module=remote status=start url={url}");

    let response = reqwest::blocking::get(url).map_err(|err| {
        error!(
            "event=sheet_fetch module=remote status=error duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        );
        FetchError::Transport(err)
    })?;

    let status = response.status();
    if !status.is_success() {
        error!(
            "event=sheet_fetch module=remote status=error duration_ms={} http_status={status}",
            started_at.elapsed().as_millis()
        );
        return Err(FetchError::Status(status));
    }

    let envelope: SheetEnvelope = response.json().map_err(|err| {
        error!(
            "event=sheet_fetch module=remote status=error duration_ms={} error_code=decode error={err}",
            started_at.elapsed().as_millis()
        );
        FetchError::Decode(err)
    })?;

    let topics = normalize_nested(envelope.data.sheet.topics);
    info!(
        "event=sheet_fetch module=remote status=ok duration_ms={} topics={}",
        started_at.elapsed().as_millis(),
        topics.len()
    );
    Ok(topics)
}

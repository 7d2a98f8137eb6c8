//! Remote punch-sheet fetching.
//!
//! The sheet is published as CSV behind two Google endpoints: the plain
//! export URL and the gviz query URL. Fetching tries each in order and only
//! fails once every endpoint has failed. A private sheet is a hard stop:
//! the endpoints answer 401/403 or serve a sign-in page instead of CSV, and
//! no alternate endpoint will do better until the sheet is shared.

use chrono::Utc;
use tracing::{info, warn};
use url::Url;

use crate::error::{EngineError, EngineResult};
use crate::models::Punch;

use super::parse::parse_rows;

/// The published spreadsheet a punch sheet is read from.
///
/// # Example
///
/// ```
/// use attendance_engine::fetch::SheetSource;
///
/// let source = SheetSource::new("19RGdbc0", "แสดงผล");
/// assert!(source.export_url().starts_with("https://docs.google.com/spreadsheets/d/19RGdbc0/export"));
/// ```
#[derive(Debug, Clone)]
pub struct SheetSource {
    /// The spreadsheet document identifier.
    pub sheet_id: String,
    /// The tab name within the spreadsheet.
    pub sheet_name: String,
}

impl SheetSource {
    /// Creates a source for one spreadsheet tab.
    pub fn new(sheet_id: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        SheetSource {
            sheet_id: sheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// The plain CSV export endpoint, usually the most reliable for a
    /// publicly shared sheet.
    pub fn export_url(&self) -> String {
        let mut url = Url::parse("https://docs.google.com/spreadsheets/")
            .expect("valid base url");
        url.path_segments_mut()
            .expect("https urls have path segments")
            .pop_if_empty()
            .extend(["d", &self.sheet_id, "export"]);
        url.query_pairs_mut()
            .append_pair("format", "csv")
            .append_pair("sheet", &self.sheet_name);
        url.into()
    }

    /// The gviz query endpoint, used as a fallback when the export endpoint
    /// misbehaves.
    pub fn gviz_url(&self) -> String {
        let mut url = Url::parse("https://docs.google.com/spreadsheets/")
            .expect("valid base url");
        url.path_segments_mut()
            .expect("https urls have path segments")
            .pop_if_empty()
            .extend(["d", &self.sheet_id, "gviz", "tq"]);
        url.query_pairs_mut()
            .append_pair("tqx", "out:csv")
            .append_pair("sheet", &self.sheet_name);
        url.into()
    }

    fn endpoints(&self) -> Vec<(&'static str, String)> {
        vec![("export", self.export_url()), ("gviz", self.gviz_url())]
    }
}

/// Returns true when a response body is a sign-in page rather than CSV.
fn body_looks_private(body: &str) -> bool {
    body.contains("<!DOCTYPE html") || body.contains("<html") || body.contains("Sign in")
}

/// Returns true when the CSV body carries data rows beyond the header.
fn has_data_rows(body: &str) -> bool {
    body.lines().skip(1).any(|line| !line.trim().is_empty())
}

/// Fetches and parses the punch sheet, trying each endpoint in order.
///
/// Every request carries a `_t` timestamp parameter to defeat intermediary
/// caches. An endpoint that yields rows but zero valid punches is treated
/// as a failed attempt, since the gviz endpoint sometimes serves a
/// differently-shaped table.
///
/// # Errors
///
/// Returns [`EngineError::PrivateSource`] as soon as any endpoint answers
/// 401/403 or serves a sign-in page, and [`EngineError::FetchFailed`] once
/// every endpoint has failed for other reasons.
pub async fn fetch_punches(
    client: &reqwest::Client,
    source: &SheetSource,
) -> EngineResult<Vec<Punch>> {
    let cache_buster = Utc::now().timestamp_millis().to_string();
    let mut last_error = String::from("no endpoints attempted");

    for (label, endpoint) in source.endpoints() {
        let mut url = match Url::parse(&endpoint) {
            Ok(url) => url,
            Err(err) => {
                last_error = format!("{label}: bad endpoint url: {err}");
                continue;
            }
        };
        url.query_pairs_mut().append_pair("_t", &cache_buster);

        info!(endpoint = label, "fetching punch sheet");
        let response = match client.get(url.as_str()).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint = label, error = %err, "punch sheet request failed");
                last_error = format!("{label}: {err}");
                continue;
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(EngineError::PrivateSource);
        }
        if !status.is_success() {
            warn!(endpoint = label, status = %status, "punch sheet endpoint errored");
            last_error = format!("{label}: HTTP status {status}");
            continue;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(endpoint = label, error = %err, "punch sheet body unreadable");
                last_error = format!("{label}: {err}");
                continue;
            }
        };
        if body_looks_private(&body) {
            return Err(EngineError::PrivateSource);
        }

        let punches = parse_rows(&body);
        if punches.is_empty() && has_data_rows(&body) {
            warn!(endpoint = label, "rows parsed but no valid punches, trying next endpoint");
            last_error = format!("{label}: rows parsed but no valid punches");
            continue;
        }

        info!(endpoint = label, punch_count = punches.len(), "punch sheet fetched");
        return Ok(punches);
    }

    Err(EngineError::FetchFailed {
        message: last_error,
    })
}

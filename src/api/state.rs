//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::fetch::SheetSource;

/// Shared application state.
///
/// Contains resources shared across all request handlers: the configured
/// punch-sheet source and a pooled HTTP client for fetching it.
#[derive(Clone)]
pub struct AppState {
    source: Arc<SheetSource>,
    http: reqwest::Client,
}

impl AppState {
    /// Creates a new application state for the given punch-sheet source.
    pub fn new(source: SheetSource) -> Self {
        Self {
            source: Arc::new(source),
            http: reqwest::Client::new(),
        }
    }

    /// Returns the configured punch-sheet source.
    pub fn source(&self) -> &SheetSource {
        &self.source
    }

    /// Returns the shared HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

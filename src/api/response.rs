//! Response types for the attendance engine API.
//!
//! This module defines the roster row structure plus the error response
//! structures and error handling for the HTTP API.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::scoring::OvertimeSummary;

/// One person's row of the monthly roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRosterRow {
    /// Display name of the person.
    pub person_name: String,
    /// Day of month to the rendered roster cell: shift symbols, an
    /// override label, or `0` for an empty day.
    pub shifts_by_day: BTreeMap<u32, String>,
    /// The person's overtime tallies for the month.
    pub summary: OvertimeSummary,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidMonth { year, month } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_MONTH",
                    format!("Invalid month {} of year {}", month, year),
                    "Month must be between 1 and 12 and form a valid calendar month",
                ),
            },
            EngineError::PrivateSource => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "PRIVATE_SOURCE",
                    "Punch sheet is private or unreadable",
                    "Share the sheet publicly before retrying; alternate endpoints will not help",
                ),
            },
            EngineError::FetchFailed { message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "FETCH_FAILED",
                    "Failed to fetch punch sheet",
                    message,
                ),
            },
        }
    }
}

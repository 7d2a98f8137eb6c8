//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all roster endpoints.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::fetch::fetch_punches;
use crate::matching::{aggregate_month, match_shifts_for_day};
use crate::models::{MonthlyAttendance, Punch};
use crate::scoring::{DayOverride, day_display, score_month};

use super::request::{DayRosterRequest, MonthRosterRequest, OverrideRequest};
use super::response::{ApiError, ApiErrorResponse, MonthRosterRow};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roster/day", post(day_roster_handler))
        .route("/roster/month", post(month_roster_handler))
        .route("/roster/sheet/:year/:month", get(sheet_roster_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to a structured API error.
fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for the POST /roster/day endpoint.
///
/// Reconciles the submitted punches against one calendar day and returns
/// the day's shift records.
async fn day_roster_handler(
    payload: Result<Json<DayRosterRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day roster request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let mut punches: Vec<Punch> = request.punches.into_iter().map(Into::into).collect();
    punches.sort_by_key(|p| p.timestamp);

    let start_time = Instant::now();
    let records = match_shifts_for_day(&punches, request.date);
    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        punch_count = punches.len(),
        record_count = records.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Day roster computed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(records),
    )
        .into_response()
}

/// Handler for the POST /roster/month endpoint.
///
/// Aggregates the submitted punch history into a monthly roster with
/// per-person overtime summaries, applying any submitted day overrides.
async fn month_roster_handler(
    payload: Result<Json<MonthRosterRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing month roster request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let mut punches: Vec<Punch> = request.punches.into_iter().map(Into::into).collect();
    punches.sort_by_key(|p| p.timestamp);

    let start_time = Instant::now();
    match aggregate_month(&punches, request.year, request.month) {
        Ok(aggregates) => {
            let rows =
                build_roster_rows(aggregates, request.public_holidays, &request.overrides);
            info!(
                correlation_id = %correlation_id,
                year = request.year,
                month = request.month,
                person_count = rows.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Month roster computed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(rows),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Month roster failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Query parameters for the GET /roster/sheet endpoint.
#[derive(Debug, Deserialize)]
struct SheetRosterQuery {
    #[serde(default)]
    public_holidays: u32,
}

/// Handler for the GET /roster/sheet/{year}/{month} endpoint.
///
/// Fetches the configured punch sheet and returns the monthly roster for
/// it. Overrides are a per-request concern and do not apply here.
async fn sheet_roster_handler(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<SheetRosterQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        year,
        month,
        "Processing sheet roster request"
    );

    let punches = match fetch_punches(state.http(), state.source()).await {
        Ok(punches) => punches,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Punch sheet fetch failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    match aggregate_month(&punches, year, month) {
        Ok(aggregates) => {
            let rows = build_roster_rows(aggregates, query.public_holidays, &[]);
            info!(
                correlation_id = %correlation_id,
                punch_count = punches.len(),
                person_count = rows.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Sheet roster computed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(rows),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Sheet roster failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Renders monthly aggregates into roster rows with overtime summaries.
fn build_roster_rows(
    aggregates: Vec<MonthlyAttendance>,
    public_holidays: u32,
    overrides: &[OverrideRequest],
) -> Vec<MonthRosterRow> {
    aggregates
        .into_iter()
        .map(|attendance| {
            let person_overrides: BTreeMap<u32, DayOverride> = overrides
                .iter()
                .filter(|o| o.person_name == attendance.person_name)
                .map(|o| (o.day, o.status))
                .collect();

            let summary = score_month(&attendance, public_holidays, &person_overrides);
            let shifts_by_day = attendance
                .shifts_by_day
                .iter()
                .map(|(day, symbols)| {
                    (*day, day_display(symbols, person_overrides.get(day).copied()))
                })
                .collect();

            MonthRosterRow {
                person_name: attendance.person_name,
                shifts_by_day,
                summary,
            }
        })
        .collect()
}

//! HTTP API handlers for petvitals.
//!
//! Each handler resolves the pet (and with it the breed standard) first,
//! then hands both to the trend service explicitly.
//!
//! - **GET /pets/:pet_id/health-trend**: latest checkup, overall label, and
//!   the status chart ending at the latest report.
//! - **GET /pets/:pet_id/bmi-trend**: pet vs breed BMI over the window
//!   following the latest report.
//! - **GET /pets/:pet_id/vitals?month=&year=**: the vitals card for one period.
//!
//! Clients that may fire overlapping requests for the same view send an
//! `X-View-Session` header. The view slot is claimed when the request
//! arrives, before any backend call; an older request superseded by a newer
//! one in the same session and view answers `409 Conflict` instead of stale
//! data.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use crate::data_sources::ReportSource;
use crate::error::TrendError;
use crate::model::{BmiSeries, HealthTrend, MonthlyVitals, PeriodLabel, PeriodMonth};
use crate::trend::TrendService;

/// Header carrying the caller's view session.
pub const VIEW_SESSION_HEADER: &str = "x-view-session";

/// Application state shared across handlers.
pub struct AppState<S> {
    pub trends: TrendService<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            trends: self.trends.clone(),
        }
    }
}

/// Build the router with all routes and request tracing.
pub fn router<S: ReportSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/pets/:pet_id/health-trend", get(get_health_trend::<S>))
        .route("/pets/:pet_id/bmi-trend", get(get_bmi_trend::<S>))
        .route("/pets/:pet_id/vitals", get(get_monthly_vitals::<S>))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Query parameters for GET /pets/:pet_id/vitals.
#[derive(Debug, Deserialize)]
pub struct VitalsQuery {
    /// Month name, e.g. "March" or "Mar".
    pub month: String,
    pub year: i32,
}

/// Stale-guard slot for a view within the caller's session.
fn view_slot(headers: &HeaderMap, view: &str) -> Option<String> {
    headers
        .get(VIEW_SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|session| !session.is_empty())
        .map(|session| format!("{session}:{view}"))
}

fn reject(pet_id: &str, error: TrendError) -> StatusCode {
    match error {
        TrendError::PetNotFound { .. } => {
            warn!(pet_id, "Pet not found");
            StatusCode::NOT_FOUND
        }
        TrendError::Superseded { .. } => {
            debug!(pet_id, "Request superseded");
            StatusCode::CONFLICT
        }
        TrendError::Fetch(e) => {
            warn!(pet_id, error = %e, "Backend request failed");
            StatusCode::BAD_GATEWAY
        }
    }
}

/// GET /pets/:pet_id/health-trend
///
/// # Response
///
/// ```json
/// {
///     "summary": {
///         "period": { "month": "March", "shortMonth": "Mar", "year": 2024 },
///         "statuses": { "respiratory": 2, "heart": 2, "bloodPressure": 1, "bmi": null },
///         "overall": "Healthy"
///     },
///     "overall": "Healthy",
///     "chart": { "months": ["Apr", "May"], "healthStatuses": [2, null] }
/// }
/// ```
///
/// With no usable latest report, `summary` is null, `overall` is `"-"`, and
/// the chart arrays are empty.
#[instrument(skip(state, headers))]
pub async fn get_health_trend<S: ReportSource + 'static>(
    State(state): State<AppState<S>>,
    Path(pet_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<HealthTrend>, StatusCode> {
    let ticket = view_slot(&headers, "health-trend").map(|slot| state.trends.claim(&slot));
    let pet = state
        .trends
        .find_pet(&pet_id)
        .await
        .map_err(|e| reject(&pet_id, e))?;

    match state.trends.health_trend(&pet, ticket.as_ref()).await {
        Ok(trend) => {
            info!(pet_id = %pet_id, overall = %trend.overall, "Health trend queried");
            Ok(Json(trend))
        }
        Err(e) => Err(reject(&pet_id, e)),
    }
}

/// GET /pets/:pet_id/bmi-trend
///
/// # Response
///
/// ```json
/// { "months": ["Feb", "Mar"], "petBmis": [21.5, null], "breedBmis": [20.0, 20.0] }
/// ```
#[instrument(skip(state, headers))]
pub async fn get_bmi_trend<S: ReportSource + 'static>(
    State(state): State<AppState<S>>,
    Path(pet_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BmiSeries>, StatusCode> {
    let ticket = view_slot(&headers, "bmi-trend").map(|slot| state.trends.claim(&slot));
    let pet = state
        .trends
        .find_pet(&pet_id)
        .await
        .map_err(|e| reject(&pet_id, e))?;

    match state.trends.bmi_trend(&pet, ticket.as_ref()).await {
        Ok(series) => {
            info!(pet_id = %pet_id, points = series.months.len(), "BMI trend queried");
            Ok(Json(series))
        }
        Err(e) => Err(reject(&pet_id, e)),
    }
}

/// GET /pets/:pet_id/vitals?month=March&year=2024
///
/// Returns one row per vital with its value, unit, and a status of
/// `Normal`, `Low`, `High`, or `N/A`.
#[instrument(skip(state))]
pub async fn get_monthly_vitals<S: ReportSource + 'static>(
    State(state): State<AppState<S>>,
    Path(pet_id): Path<String>,
    Query(query): Query<VitalsQuery>,
) -> Result<Json<MonthlyVitals>, StatusCode> {
    let month = query.month.parse::<PeriodMonth>().map_err(|_| {
        warn!(month = %query.month, "Invalid month");
        StatusCode::BAD_REQUEST
    })?;
    let period = PeriodLabel::new(month.0, query.year);

    let pet = state
        .trends
        .find_pet(&pet_id)
        .await
        .map_err(|e| reject(&pet_id, e))?;

    match state.trends.monthly_vitals(&pet, period).await {
        Ok(card) => {
            info!(pet_id = %pet_id, period = %period, "Monthly vitals queried");
            Ok(Json(card))
        }
        Err(e) => Err(reject(&pet_id, e)),
    }
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_view_slot() {
        let mut headers = HeaderMap::new();
        assert_eq!(view_slot(&headers, "health-trend"), None);

        headers.insert(VIEW_SESSION_HEADER, HeaderValue::from_static("tab-1"));
        assert_eq!(
            view_slot(&headers, "health-trend").as_deref(),
            Some("tab-1:health-trend")
        );
    }

    #[test]
    fn test_reject_status_codes() {
        let not_found = TrendError::PetNotFound {
            pet_id: "p".to_string(),
        };
        let superseded = TrendError::Superseded {
            pet_id: "p".to_string(),
        };

        assert_eq!(reject("p", not_found), StatusCode::NOT_FOUND);
        assert_eq!(reject("p", superseded), StatusCode::CONFLICT);
    }
}

//! Monthly revenue report routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use balance_core::reservation::{ReportPeriod, summarize_by_service};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, error::ledger_error_response, reports::ReportError};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(create_report))
        .route("/reports/{file_id}", get(download_report))
}

/// Request body for generating a report.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

/// POST `/reports` - Generate the revenue report for a month and return its link.
async fn create_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReportRequest>,
) -> impl IntoResponse {
    let period = match ReportPeriod::new(payload.year, payload.month) {
        Ok(period) => period,
        Err(e) => return ledger_error_response(&e),
    };

    let reservations = match state.ledger.list_reservations(period).await {
        Ok(reservations) => reservations,
        Err(e) => return ledger_error_response(&e),
    };
    let summary = summarize_by_service(&reservations);

    match state.reports.write(&summary).await {
        Ok(id) => {
            let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
            let link = state.reports.link(id, host);
            info!(
                year = period.year(),
                month = period.month(),
                services = summary.len(),
                report_id = %id,
                "Report generated"
            );
            (StatusCode::OK, Json(json!({ "link": link }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to write report");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "INTERNAL_ERROR",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// GET `/reports/{file_id}` - Download a generated report.
async fn download_report(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> impl IntoResponse {
    match state.reports.read(&file_id).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(ReportError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "REPORT_NOT_FOUND",
                "message": "file not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, file_id = %file_id, "Failed to read report");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

//! Mapping of ledger errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use balance_core::ledger::LedgerError;
use serde_json::json;
use tracing::error;

/// Builds the response for a failed ledger operation.
///
/// Business refusals are answered with 200 and `"status": "rejected"`;
/// infrastructure failures are logged and hidden behind a generic message.
pub fn ledger_error_response(err: &LedgerError) -> Response {
    if err.is_internal() {
        error!(error = %err, "Ledger operation failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": err.error_code(),
                "message": "An error occurred"
            })),
        )
            .into_response();
    }

    if err.is_business_failure() {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "rejected",
                "error": err.error_code(),
                "message": err.to_string()
            })),
        )
            .into_response();
    }

    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

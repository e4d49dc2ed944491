//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the `BalanceLedger` capability
//! - Ledger error to HTTP response mapping
//! - CSV report files for the monthly revenue report

pub mod error;
pub mod reports;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use balance_core::ledger::BalanceLedger;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use reports::ReportStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger every balance and reservation route delegates to.
    pub ledger: Arc<dyn BalanceLedger>,
    /// Where generated reports are written and served from.
    pub reports: Arc<ReportStore>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

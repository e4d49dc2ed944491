//! Router fixtures for handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header::CONTENT_TYPE},
};
use balance_core::ledger::{Account, BalanceLedger, LedgerError, Movement, SortKey};
use balance_core::reservation::{ReportPeriod, Reservation};
use mockall::mock;
use rust_decimal::Decimal;
use tempfile::TempDir;

use crate::{AppState, ReportStore, create_router};

mock! {
    pub Ledger {}

    #[async_trait]
    impl BalanceLedger for Ledger {
        async fn get_balance(&self, account_id: &str) -> Result<Account, LedgerError>;
        async fn change_balance(
            &self,
            account_id: &str,
            amount: Decimal,
        ) -> Result<Account, LedgerError>;
        async fn transfer_balance(
            &self,
            from_id: &str,
            to_id: &str,
            amount: Decimal,
        ) -> Result<Movement, LedgerError>;
        async fn list_transactions(
            &self,
            account_id: &str,
            sort: SortKey,
            limit: i64,
            page: i64,
        ) -> Result<Vec<Movement>, LedgerError>;
        async fn reserve_money(
            &self,
            user_id: &str,
            service_id: &str,
            order_id: &str,
            amount: Decimal,
        ) -> Result<Reservation, LedgerError>;
        async fn recognize_money(
            &self,
            user_id: &str,
            service_id: &str,
            order_id: &str,
            amount: Decimal,
        ) -> Result<Reservation, LedgerError>;
        async fn de_reserve_money(
            &self,
            user_id: &str,
            service_id: &str,
            order_id: &str,
            amount: Decimal,
        ) -> Result<Reservation, LedgerError>;
        async fn list_reservations(
            &self,
            period: ReportPeriod,
        ) -> Result<Vec<Reservation>, LedgerError>;
    }
}

/// Builds the router over a mock ledger and a temporary report directory.
pub fn app(ledger: MockLedger) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState {
        ledger: Arc::new(ledger),
        reports: Arc::new(ReportStore::new(dir.path(), None)),
    };
    (create_router(state), dir)
}

/// A JSON POST request.
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collects a response body as JSON.
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

//! Reservation routes: reserve, recognize and de-reserve.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ledger_error_response};

/// Creates the reservation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reserves", post(reserve_money))
        .route("/reserves/recognize", post(recognize_money))
        .route("/reserves/de-reserve", post(de_reserve_money))
}

/// Request body shared by all reservation routes.
#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    /// Account the funds are held on.
    pub user_id: String,
    /// Service identifier.
    pub service_id: String,
    /// Order identifier.
    pub order_id: String,
    /// Held amount.
    pub amount: Decimal,
}

/// POST `/reserves` - Hold funds against an order.
async fn reserve_money(
    State(state): State<AppState>,
    Json(payload): Json<ReserveRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .reserve_money(&payload.user_id, &payload.service_id, &payload.order_id, payload.amount)
        .await
    {
        Ok(reservation) => {
            info!(
                reservation_id = %reservation.id,
                user_id = %reservation.user_id,
                service_id = %reservation.service_id,
                order_id = %reservation.order_id,
                amount = %reservation.amount,
                "Funds reserved"
            );
            (StatusCode::CREATED, Json(reservation)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/reserves/recognize` - Consume held funds.
async fn recognize_money(
    State(state): State<AppState>,
    Json(payload): Json<ReserveRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .recognize_money(&payload.user_id, &payload.service_id, &payload.order_id, payload.amount)
        .await
    {
        Ok(reservation) => {
            info!(reservation_id = %reservation.id, "Reservation recognized");
            (StatusCode::OK, Json(reservation)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/reserves/de-reserve` - Return held funds to the account.
async fn de_reserve_money(
    State(state): State<AppState>,
    Json(payload): Json<ReserveRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .de_reserve_money(&payload.user_id, &payload.service_id, &payload.order_id, payload.amount)
        .await
    {
        Ok(reservation) => {
            info!(reservation_id = %reservation.id, "Reservation released");
            (StatusCode::OK, Json(reservation)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

//! Balance routes: reads, credits/debits, transfers and history.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use balance_core::ledger::{Account, SortKey};
use balance_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ledger_error_response};

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/balance/change", post(change_balance))
        .route("/balance/transfer", post(transfer_balance))
        .route("/balance/{id}", get(get_balance))
        .route("/balance/{id}/transactions", get(list_transactions))
}

/// Request body for crediting or debiting an account.
#[derive(Debug, Deserialize)]
pub struct ChangeBalanceRequest {
    /// Account ID.
    pub id: String,
    /// Signed amount; negative values debit.
    pub money: Decimal,
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Paying account.
    pub from_id: String,
    /// Receiving account.
    pub to_id: String,
    /// Non-negative amount.
    pub money: Decimal,
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// `date_asc`, `date_desc`, `money_asc` or `money_desc`.
    pub sort_type: Option<String>,
    /// Page size (default: 10).
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Page number, 1-indexed (default: 1).
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_limit() -> i64 {
    10
}

fn default_page() -> i64 {
    1
}

/// Response for an account balance.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Account ID.
    pub id: AccountId,
    /// Current balance.
    pub balance: Decimal,
}

impl From<Account> for BalanceResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            balance: account.balance,
        }
    }
}

/// GET `/balance/{id}` - Read an account's balance.
async fn get_balance(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.ledger.get_balance(&id).await {
        Ok(account) => (StatusCode::OK, Json(BalanceResponse::from(account))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/balance/change` - Credit or debit an account.
async fn change_balance(
    State(state): State<AppState>,
    Json(payload): Json<ChangeBalanceRequest>,
) -> impl IntoResponse {
    match state.ledger.change_balance(&payload.id, payload.money).await {
        Ok(account) => {
            info!(account_id = %account.id, money = %payload.money, "Balance changed");
            (StatusCode::OK, Json(BalanceResponse::from(account))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/balance/transfer` - Move money between two accounts.
async fn transfer_balance(
    State(state): State<AppState>,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .transfer_balance(&payload.from_id, &payload.to_id, payload.money)
        .await
    {
        Ok(movement) => {
            info!(
                from_id = %payload.from_id,
                to_id = %payload.to_id,
                money = %payload.money,
                "Balance transferred"
            );
            (
                StatusCode::OK,
                Json(json!({ "status": "ok", "transaction": movement })),
            )
                .into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/balance/{id}/transactions` - List an account's movements.
async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TransactionsQuery>,
) -> impl IntoResponse {
    let sort = query.sort_type.as_deref().map(SortKey::parse).unwrap_or_default();

    match state
        .ledger
        .list_transactions(&id, sort, query.limit, query.page)
        .await
    {
        Ok(movements) => {
            (StatusCode::OK, Json(json!({ "transactions": movements }))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use balance_core::ledger::{Account, LedgerError, Movement, Operation, SortKey};
    use balance_shared::types::{AccountId, MovementId};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::test_support::{MockLedger, app, json_body, post_json};

    const ACCOUNT: &str = "34be95d0-9a41-11ec-b909-0242ac120003";

    fn account(balance: rust_decimal::Decimal) -> Account {
        Account::new(ACCOUNT.parse().unwrap(), balance)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_get_balance() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_get_balance()
            .withf(|id| id == ACCOUNT)
            .returning(|_| Ok(account(dec!(100.00))));
        let (app, _dir) = app(ledger);

        let response = app.oneshot(get(&format!("/api/v1/balance/{ACCOUNT}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, json!({ "id": ACCOUNT, "balance": "100.00" }));
    }

    #[tokio::test]
    async fn test_get_balance_not_found() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_get_balance()
            .returning(|id| Err(LedgerError::AccountNotFound(id.to_string())));
        let (app, _dir) = app(ledger);

        let response = app.oneshot(get(&format!("/api/v1/balance/{ACCOUNT}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "ACCOUNT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_change_balance() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_change_balance()
            .withf(|id, money| id == ACCOUNT && *money == dec!(-25.50))
            .returning(|_, _| Ok(account(dec!(74.50))));
        let (app, _dir) = app(ledger);

        let response = app
            .oneshot(post_json(
                "/api/v1/balance/change",
                &json!({ "id": ACCOUNT, "money": "-25.50" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["balance"], "74.50");
    }

    #[tokio::test]
    async fn test_insufficient_funds_is_a_rejected_ok() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_change_balance()
            .returning(|_, _| Err(LedgerError::InsufficientFunds));
        let (app, _dir) = app(ledger);

        let response = app
            .oneshot(post_json(
                "/api/v1/balance/change",
                &json!({ "id": ACCOUNT, "money": -1 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["error"], "INSUFFICIENT_FUNDS");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (app, _dir) = app(MockLedger::new());

        let response = app
            .oneshot(post_json("/api/v1/balance/change", &json!({ "id": ACCOUNT })))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_transfer() {
        let from = AccountId::new();
        let to = AccountId::new();
        let mut ledger = MockLedger::new();
        ledger
            .expect_transfer_balance()
            .withf(move |f, t, money| {
                *f == from.to_string() && *t == to.to_string() && *money == dec!(40)
            })
            .returning(move |_, _, money| {
                Ok(Movement {
                    id: MovementId::new(),
                    to_id: Some(to),
                    from_id: Some(from),
                    money,
                    operation: Operation::Transfer,
                    created_at: Utc::now(),
                })
            });
        let (app, _dir) = app(ledger);

        let response = app
            .oneshot(post_json(
                "/api/v1/balance/transfer",
                &json!({ "from_id": from.to_string(), "to_id": to.to_string(), "money": "40" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["transaction"]["operation"], "transfer");
        assert_eq!(body["transaction"]["from_id"], from.to_string());
    }

    #[tokio::test]
    async fn test_transfer_negative_amount() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_transfer_balance()
            .returning(|_, _, _| Err(LedgerError::NegativeAmount));
        let (app, _dir) = app(ledger);

        let response = app
            .oneshot(post_json(
                "/api/v1/balance/transfer",
                &json!({ "from_id": ACCOUNT, "to_id": ACCOUNT, "money": "-1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_transactions_query_parameters() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_list_transactions()
            .withf(|_, sort, limit, page| *sort == SortKey::MoneyDesc && *limit == 5 && *page == 3)
            .returning(|_, _, _, _| Ok(vec![]));
        let (app, _dir) = app(ledger);

        let response = app
            .oneshot(get(&format!(
                "/api/v1/balance/{ACCOUNT}/transactions?sort_type=MONEY_DESC&limit=5&page=3"
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "transactions": [] }));
    }

    #[tokio::test]
    async fn test_list_transactions_defaults() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_list_transactions()
            .withf(|_, sort, limit, page| *sort == SortKey::Natural && *limit == 10 && *page == 1)
            .returning(|_, _, _, _| Ok(vec![]));
        let (app, _dir) = app(ledger);

        let response = app
            .oneshot(get(&format!("/api/v1/balance/{ACCOUNT}/transactions")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_transactions_negative_limit() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_list_transactions()
            .returning(|_, _, _, _| Err(LedgerError::InvalidSortParameters));
        let (app, _dir) = app(ledger);

        let response = app
            .oneshot(get(&format!("/api/v1/balance/{ACCOUNT}/transactions?limit=-1")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "INVALID_SORT_PARAMETERS");
    }
}

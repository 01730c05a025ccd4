//! HTTP handlers for accounts, transactions and health checks

use super::extractor::Payload;
use crate::core::account::Account;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::service::{
    AccountService, CreateAccountRequest, CreateTransactionRequest, TransactionService,
};
use crate::core::transaction::Transaction;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub transactions: TransactionService,
}

impl AppState {
    /// Check both stores, stopping at the first failure
    pub async fn ping(&self) -> LedgerResult<()> {
        self.accounts.ping().await?;
        self.transactions.ping().await
    }
}

// =============================================================================
// Response bodies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account_id: i64,
    pub document_number: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.id,
            document_number: account.document_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction_id: i64,
    pub account_id: i64,
    pub operation_type_id: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub event_date: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            transaction_id: transaction.id,
            account_id: transaction.account_id,
            operation_type_id: transaction.operation_type.code(),
            amount: transaction.amount,
            event_date: transaction.event_date,
        }
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// `POST /accounts`
pub async fn create_account(
    State(state): State<AppState>,
    Payload(request): Payload<CreateAccountRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let account = state.accounts.create(request).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// `GET /accounts/{id}`
///
/// An id that is not a 64-bit integer cannot name an account, so it is
/// reported as `NotFound`.
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, LedgerError> {
    let id: i64 = id.parse().map_err(|_| LedgerError::not_found())?;
    let account = state.accounts.get_by_id(id).await?;
    Ok(Json(AccountResponse::from(account)))
}

// =============================================================================
// Transactions
// =============================================================================

/// `POST /transactions`
pub async fn create_transaction(
    State(state): State<AppState>,
    Payload(request): Payload<CreateTransactionRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let transaction = state.transactions.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(transaction)),
    ))
}

// =============================================================================
// Health
// =============================================================================

/// `GET /status` and `GET /healthcheck/readiness`
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))),
        Err(err) => {
            tracing::warn!(error = %err.cause_chain(), "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "ok": false })))
        }
    }
}

/// `GET /healthcheck/liveliness`
pub async fn liveliness() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

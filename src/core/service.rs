//! Account and transaction services
//!
//! Services own the business rules and sit between the HTTP handlers and the
//! stores:
//!
//! - [`AccountService`] normalizes and validates document numbers
//! - [`TransactionService`] enforces payload, operation type, amount and
//!   account existence rules before persisting a ledger entry

use crate::core::account::Account;
use crate::core::document::{self, DocumentKind};
use crate::core::error::{ErrorKind, LedgerError, LedgerResult};
use crate::core::operation_type::OperationType;
use crate::core::store::{AccountStore, TransactionStore};
use crate::core::transaction::Transaction;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::cmp::Ordering;
use std::sync::Arc;
use validator::Validate;

// =============================================================================
// Requests
// =============================================================================

/// Payload for `POST /accounts`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub document_number: Option<String>,
}

impl CreateAccountRequest {
    pub fn new(document_number: impl Into<String>) -> Self {
        Self {
            document_number: Some(document_number.into()),
        }
    }
}

/// Payload for `POST /transactions`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    #[validate(required)]
    #[serde(default)]
    pub account_id: Option<i64>,

    #[validate(required)]
    #[serde(default)]
    pub operation_type_id: Option<i64>,

    /// Decoded from the literal digits of the JSON number, never via `f64`
    #[validate(required)]
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,
}

impl CreateTransactionRequest {
    pub fn new(account_id: i64, operation_type_id: i64, amount: Decimal) -> Self {
        Self {
            account_id: Some(account_id),
            operation_type_id: Some(operation_type_id),
            amount: Some(amount),
        }
    }
}

// =============================================================================
// Account lookup seam
// =============================================================================

/// Resolves account ids for the transaction rules
///
/// Implemented by [`AccountService`]; tests can swap in their own lookup.
#[async_trait]
pub trait AccountFetcher: Send + Sync {
    /// Fetch an account, failing with `NotFound` if it does not exist
    async fn fetch_account(&self, id: i64) -> LedgerResult<Account>;
}

// =============================================================================
// AccountService
// =============================================================================

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Register a new account
    ///
    /// The document number is normalized to digits before validation, so
    /// `"233.838.290-06"` is stored as `"23383829006"`. Uniqueness is left to
    /// the store, which reports `Duplicated`.
    pub async fn create(&self, request: CreateAccountRequest) -> LedgerResult<Account> {
        request.validate()?;
        let Some(raw) = request.document_number else {
            return Err(LedgerError::invalid_payload());
        };

        let document_number = document::normalize(&raw);
        if !document::validate(&document_number) {
            tracing::debug!(document_number = %raw, "rejected document number");
            return Err(LedgerError::new(ErrorKind::InvalidDocumentNumber));
        }

        let kind = DocumentKind::of(&document_number);
        let account = self.store.create(Account::new(document_number)).await?;

        tracing::info!(account_id = account.id, kind = ?kind, "account created");
        Ok(account)
    }

    /// Get an account by id, failing with `NotFound` if absent
    pub async fn get_by_id(&self, id: i64) -> LedgerResult<Account> {
        self.store.get(id).await?.ok_or_else(LedgerError::not_found)
    }

    pub async fn ping(&self) -> LedgerResult<()> {
        self.store.ping().await
    }
}

#[async_trait]
impl AccountFetcher for AccountService {
    async fn fetch_account(&self, id: i64) -> LedgerResult<Account> {
        self.get_by_id(id).await
    }
}

// =============================================================================
// TransactionService
// =============================================================================

#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
    accounts: Arc<dyn AccountFetcher>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>, accounts: Arc<dyn AccountFetcher>) -> Self {
        Self { store, accounts }
    }

    /// Validate and post a ledger entry
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. all fields present and non-zero (`InvalidPayload`)
    /// 2. operation type registered (`InvalidOperationTypeId`)
    /// 3. amount sign and precision (`InvalidAmount`)
    /// 4. account exists (`AccountIdNotFound`)
    ///
    /// The store is only called once every check has passed.
    pub async fn create(&self, request: CreateTransactionRequest) -> LedgerResult<Transaction> {
        request.validate()?;
        let (Some(account_id), Some(operation_type_id), Some(amount)) =
            (request.account_id, request.operation_type_id, request.amount)
        else {
            return Err(LedgerError::invalid_payload());
        };

        if account_id == 0 || operation_type_id == 0 || amount.is_zero() {
            return Err(LedgerError::invalid_payload());
        }

        let operation_type = OperationType::try_from(operation_type_id)?;

        if !has_valid_amount(amount, operation_type) {
            tracing::debug!(%amount, ?operation_type, "rejected amount");
            return Err(LedgerError::new(ErrorKind::InvalidAmount));
        }

        self.accounts
            .fetch_account(account_id)
            .await
            .map_err(|err| {
                if err.is(ErrorKind::NotFound) {
                    LedgerError::with_source(ErrorKind::AccountIdNotFound, err)
                } else {
                    err
                }
            })?;

        let transaction = self
            .store
            .create(Transaction::new(account_id, operation_type, amount))
            .await?;

        tracing::info!(
            transaction_id = transaction.id,
            account_id,
            operation_type = operation_type.code(),
            "transaction created"
        );
        Ok(transaction)
    }

    pub async fn ping(&self) -> LedgerResult<()> {
        self.store.ping().await
    }
}

/// Whether `amount` is acceptable for `operation_type`
///
/// The amount must carry at most two fractional digits (`amount * 100 % 1`
/// is zero) and its sign must match the operation type's expected sign.
/// Zero never matches.
pub fn has_valid_amount(amount: Decimal, operation_type: OperationType) -> bool {
    let has_two_decimals = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_rem(Decimal::ONE))
        .is_some_and(|remainder| remainder.is_zero());

    has_two_decimals && sign(amount) == operation_type.expected_sign()
}

fn sign(amount: Decimal) -> i8 {
    match amount.cmp(&Decimal::ZERO) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

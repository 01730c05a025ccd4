//! Store traits for accounts and transactions
//!
//! The services are agnostic to the underlying storage. Each backend
//! (`storage::in_memory`, `storage::postgres`) implements both traits.

use crate::core::account::Account;
use crate::core::error::LedgerResult;
use crate::core::transaction::Transaction;
use async_trait::async_trait;

/// Persistence for accounts
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account and return it with its assigned id
    ///
    /// Fails with `Duplicated` when the document number already exists.
    async fn create(&self, account: Account) -> LedgerResult<Account>;

    /// Get an account by id
    async fn get(&self, id: i64) -> LedgerResult<Option<Account>>;

    /// Check that the backend is reachable
    async fn ping(&self) -> LedgerResult<()>;
}

/// Create-only persistence for transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert a new transaction and return it with its assigned id
    async fn create(&self, transaction: Transaction) -> LedgerResult<Transaction>;

    /// Check that the backend is reachable
    async fn ping(&self) -> LedgerResult<()>;
}

//! In-memory stores for testing and development

use crate::core::account::Account;
use crate::core::error::{ErrorKind, LedgerError, LedgerResult};
use crate::core::store::{AccountStore, TransactionStore};
use crate::core::transaction::Transaction;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct AccountTable {
    last_id: i64,
    rows: BTreeMap<i64, Account>,
}

/// In-memory account store
///
/// Uses RwLock for thread-safe access. Ids are assigned from a counter held
/// under the same lock as the rows, and document numbers are unique.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    table: Arc<RwLock<AccountTable>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, mut account: Account) -> LedgerResult<Account> {
        let mut table = self
            .table
            .write()
            .map_err(|e| LedgerError::internal(format!("Failed to acquire write lock: {}", e)))?;

        if table
            .rows
            .values()
            .any(|existing| existing.document_number == account.document_number)
        {
            return Err(LedgerError::with_source(
                ErrorKind::Duplicated,
                format!("document number {} already exists", account.document_number),
            ));
        }

        table.last_id += 1;
        account.id = table.last_id;
        table.rows.insert(account.id, account.clone());

        Ok(account)
    }

    async fn get(&self, id: i64) -> LedgerResult<Option<Account>> {
        let table = self
            .table
            .read()
            .map_err(|e| LedgerError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn ping(&self) -> LedgerResult<()> {
        self.table
            .read()
            .map(|_| ())
            .map_err(|e| LedgerError::internal(format!("Account store poisoned: {}", e)))
    }
}

#[derive(Default)]
struct TransactionTable {
    last_id: i64,
    rows: Vec<Transaction>,
}

/// In-memory, append-only transaction store
#[derive(Clone, Default)]
pub struct InMemoryTransactionStore {
    table: Arc<RwLock<TransactionTable>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored entry, in insertion order
    pub fn entries(&self) -> LedgerResult<Vec<Transaction>> {
        let table = self
            .table
            .read()
            .map_err(|e| LedgerError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.rows.clone())
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create(&self, mut transaction: Transaction) -> LedgerResult<Transaction> {
        let mut table = self
            .table
            .write()
            .map_err(|e| LedgerError::internal(format!("Failed to acquire write lock: {}", e)))?;

        table.last_id += 1;
        transaction.id = table.last_id;
        table.rows.push(transaction.clone());

        Ok(transaction)
    }

    async fn ping(&self) -> LedgerResult<()> {
        self.table
            .read()
            .map(|_| ())
            .map_err(|e| LedgerError::internal(format!("Transaction store poisoned: {}", e)))
    }
}

//! # Ledger API
//!
//! A small ledger REST service: accounts identified by a Brazilian tax
//! document (CPF or CNPJ) and an append-only list of signed transactions
//! posted against them.
//!
//! ## Features
//!
//! - **Document validation**: CPF/CNPJ normalization and check-digit verification
//! - **Operation types**: fixed catalog with per-type sign rules
//! - **Exact amounts**: `rust_decimal` end to end, at most two fractional digits
//! - **Pluggable storage**: in-memory stores or PostgreSQL via `sqlx`
//! - **Typed errors**: every failure maps to a stable code and HTTP status
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ledger::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_account_store(InMemoryAccountStore::new())
//!         .with_transaction_store(InMemoryTransactionStore::new())
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        account::Account,
        document::{self, DocumentKind},
        error::{ErrorKind, ErrorResponse, LedgerError, LedgerResult},
        operation_type::OperationType,
        service::{
            AccountFetcher, AccountService, CreateAccountRequest, CreateTransactionRequest,
            TransactionService,
        },
        store::{AccountStore, TransactionStore},
        transaction::Transaction,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryAccountStore, InMemoryTransactionStore};
    #[cfg(feature = "postgres")]
    pub use crate::storage::{PostgresAccountStore, PostgresTransactionStore};

    // === Config ===
    pub use crate::config::{LedgerConfig, LogFormat};

    // === Server ===
    pub use crate::server::{AccountResponse, AppState, ServerBuilder, TransactionResponse};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
}

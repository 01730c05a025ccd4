//! Core module containing the ledger domain: entities, rules and store traits

pub mod account;
pub mod document;
pub mod error;
pub mod operation_type;
pub mod service;
pub mod store;
pub mod transaction;

pub use account::Account;
pub use document::DocumentKind;
pub use error::{ErrorKind, ErrorResponse, LedgerError, LedgerResult};
pub use operation_type::OperationType;
pub use service::{
    AccountFetcher, AccountService, CreateAccountRequest, CreateTransactionRequest,
    TransactionService,
};
pub use store::{AccountStore, TransactionStore};
pub use transaction::Transaction;

//! ServerBuilder for fluent API to build the ledger HTTP server

use super::handlers::AppState;
use super::router::build_routes;
use crate::core::service::{AccountService, TransactionService};
use crate::core::store::{AccountStore, TransactionStore};
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder for the ledger HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_account_store(InMemoryAccountStore::new())
///     .with_transaction_store(InMemoryTransactionStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    account_store: Option<Arc<dyn AccountStore>>,
    transaction_store: Option<Arc<dyn TransactionStore>>,
    request_timeout: Duration,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            account_store: None,
            transaction_store: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the account store (required)
    pub fn with_account_store(mut self, store: impl AccountStore + 'static) -> Self {
        self.account_store = Some(Arc::new(store));
        self
    }

    /// Set the transaction store (required)
    pub fn with_transaction_store(mut self, store: impl TransactionStore + 'static) -> Self {
        self.transaction_store = Some(Arc::new(store));
        self
    }

    /// Bound the time spent on a single request
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Wire the services together into the shared handler state
    pub fn build_state(self) -> Result<AppState> {
        let account_store = self.account_store.ok_or_else(|| {
            anyhow!("AccountStore is required. Call .with_account_store()")
        })?;
        let transaction_store = self.transaction_store.ok_or_else(|| {
            anyhow!("TransactionStore is required. Call .with_transaction_store()")
        })?;

        let accounts = AccountService::new(account_store);
        let transactions = TransactionService::new(transaction_store, Arc::new(accounts.clone()));

        Ok(AppState {
            accounts,
            transactions,
        })
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let request_timeout = self.request_timeout;
        let state = self.build_state()?;
        Ok(build_routes(state, request_timeout))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_account_store(accounts)
    ///     .with_transaction_store(transactions)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once Ctrl+C or SIGTERM is received
///
/// A signal handler that cannot be installed never resolves, so the other
/// signal still triggers shutdown.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::{CreateAccountRequest, CreateTransactionRequest};
    use crate::storage::{InMemoryAccountStore, InMemoryTransactionStore};
    use rust_decimal_macros::dec;

    // ── Constructor tests ────────────────────────────────────────────────

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.account_store.is_none());
        assert!(builder.transaction_store.is_none());
        assert_eq!(builder.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_default_is_same_as_new() {
        let builder = ServerBuilder::default();
        assert!(builder.account_store.is_none());
        assert!(builder.transaction_store.is_none());
        assert_eq!(builder.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_with_request_timeout() {
        let builder = ServerBuilder::new().with_request_timeout(Duration::from_secs(5));
        assert_eq!(builder.request_timeout, Duration::from_secs(5));
    }

    // ── build ────────────────────────────────────────────────────────────

    #[test]
    fn test_build_without_account_store_fails() {
        let result = ServerBuilder::new()
            .with_transaction_store(InMemoryTransactionStore::new())
            .build();
        let err = result.err().expect("should be Err");
        assert!(err.to_string().contains("AccountStore is required"));
    }

    #[test]
    fn test_build_without_transaction_store_fails() {
        let result = ServerBuilder::new()
            .with_account_store(InMemoryAccountStore::new())
            .build();
        let err = result.err().expect("should be Err");
        assert!(err.to_string().contains("TransactionStore is required"));
    }

    #[test]
    fn test_build_with_both_stores() {
        let result = ServerBuilder::new()
            .with_account_store(InMemoryAccountStore::new())
            .with_transaction_store(InMemoryTransactionStore::new())
            .build();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_build_state_shares_account_store() {
        let state = ServerBuilder::new()
            .with_account_store(InMemoryAccountStore::new())
            .with_transaction_store(InMemoryTransactionStore::new())
            .build_state()
            .unwrap();

        let account = state
            .accounts
            .create(CreateAccountRequest::new("23383829006"))
            .await
            .unwrap();

        let transaction = state
            .transactions
            .create(CreateTransactionRequest::new(account.id, 4, dec!(10.00)))
            .await
            .unwrap();
        assert_eq!(transaction.account_id, account.id);
        assert!(state.ping().await.is_ok());
    }
}

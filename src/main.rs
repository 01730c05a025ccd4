//! Ledger API server entry point

use anyhow::Result;
use ledger::config::LedgerConfig;
use ledger::server::{ServerBuilder, telemetry};
use ledger::storage::{InMemoryAccountStore, InMemoryTransactionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = LedgerConfig::load()?;
    telemetry::init(&config)?;

    tracing::info!(
        environment = %config.environment,
        address = %config.bind_address(),
        "Starting ledger API"
    );

    let builder = ServerBuilder::new().with_request_timeout(config.request_timeout());

    let builder = match config.database_url.as_deref() {
        Some(url) => with_postgres(builder, url).await?,
        None => {
            tracing::info!("No DATABASE_URL configured, using in-memory storage");
            builder
                .with_account_store(InMemoryAccountStore::new())
                .with_transaction_store(InMemoryTransactionStore::new())
        }
    };

    builder.serve(&config.bind_address()).await
}

#[cfg(feature = "postgres")]
async fn with_postgres(builder: ServerBuilder, url: &str) -> Result<ServerBuilder> {
    use ledger::storage::{PostgresAccountStore, PostgresTransactionStore, postgres};

    let pool = postgres::connect(url).await?;
    postgres::run_migrations(&pool).await?;
    tracing::info!("Connected to PostgreSQL, migrations applied");

    Ok(builder
        .with_account_store(PostgresAccountStore::new(pool.clone()))
        .with_transaction_store(PostgresTransactionStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn with_postgres(_builder: ServerBuilder, _url: &str) -> Result<ServerBuilder> {
    anyhow::bail!("DATABASE_URL is set but the `postgres` feature is disabled")
}

//! Integration tests for the PostgreSQL stores.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a PostgreSQL container)
//! - Feature flag `postgres` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features postgres --test postgres_tests -- --test-threads=1
//! ```
//!
//! # Test isolation
//!
//! All tests share a single PostgreSQL container (via `OnceLock`). Each test
//! creates a fresh `PgPool` and truncates tables before running.

#![cfg(feature = "postgres")]

use axum::http::StatusCode;
use axum_test::TestServer;
use ledger::prelude::*;
use ledger::storage::postgres;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::OnceLock;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh pool per test)
// ---------------------------------------------------------------------------

/// Holds the testcontainer handle (keeps it alive) and the connection URL.
struct PgTestEnv {
    _container: testcontainers::ContainerAsync<Postgres>,
    connection_url: String,
}

/// Lives in a std `OnceLock` so the container outlives the per-test tokio
/// runtimes.
static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    // Migrations run through the same entry point as the binary
    let pool = postgres::connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    postgres::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool.close().await;

    let _ = TEST_ENV.set(PgTestEnv {
        _container: container,
        connection_url: url,
    });
    TEST_ENV.get().unwrap()
}

/// Fresh pool bound to the current runtime, with empty tables
async fn clean_pool() -> PgPool {
    let env = init_pg_env().await;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&env.connection_url)
        .await
        .expect("Failed to connect to PostgreSQL");

    sqlx::query("TRUNCATE transactions, accounts RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate tables");

    pool
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = clean_pool().await;
    postgres::run_migrations(&pool).await.unwrap();
}

#[tokio::test]
async fn test_account_create_and_get() {
    let store = PostgresAccountStore::new(clean_pool().await);

    let created = store.create(Account::new("23383829006")).await.unwrap();
    assert_eq!(created.id, 1);
    assert!(created.is_persisted());

    let fetched = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.document_number, "23383829006");

    assert!(store.get(987).await.unwrap().is_none());
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
async fn test_account_unique_document_number() {
    let store = PostgresAccountStore::new(clean_pool().await);

    store.create(Account::new("05677940000133")).await.unwrap();
    let err = store
        .create(Account::new("05677940000133"))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::Duplicated));
}

#[tokio::test]
async fn test_transaction_create_keeps_exact_amount() {
    let pool = clean_pool().await;
    let accounts = PostgresAccountStore::new(pool.clone());
    let transactions = PostgresTransactionStore::new(pool.clone());

    let account = accounts.create(Account::new("23383829006")).await.unwrap();
    let created = transactions
        .create(Transaction::new(
            account.id,
            OperationType::Withdraw,
            dec!(-18.70),
        ))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.amount, dec!(-18.70));

    let stored: Decimal = sqlx::query_scalar("SELECT amount FROM transactions WHERE id = $1")
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, dec!(-18.70));
}

#[tokio::test]
async fn test_transaction_stores_large_amounts() {
    let pool = clean_pool().await;
    let accounts = PostgresAccountStore::new(pool.clone());
    let transactions = PostgresTransactionStore::new(pool);

    let account = accounts.create(Account::new("27935572003")).await.unwrap();

    for amount in ["1000000000000000000.00", "1000000000000000000000000.05"] {
        let amount: Decimal = amount.parse().unwrap();
        let created = transactions
            .create(Transaction::new(account.id, OperationType::Payment, amount))
            .await
            .unwrap();
        assert_eq!(created.amount, amount);
    }
}

#[tokio::test]
async fn test_transaction_requires_existing_account() {
    let transactions = PostgresTransactionStore::new(clean_pool().await);

    let err = transactions
        .create(Transaction::new(42, OperationType::Payment, dec!(1.15)))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::Internal));
}

// ---------------------------------------------------------------------------
// HTTP against PostgreSQL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_http_flow() {
    let pool = clean_pool().await;
    let app = ServerBuilder::new()
        .with_account_store(PostgresAccountStore::new(pool.clone()))
        .with_transaction_store(PostgresTransactionStore::new(pool))
        .build()
        .unwrap();
    let server = TestServer::try_new(app).unwrap();

    server.get("/healthcheck/readiness").await.assert_status_ok();

    let response = server
        .post("/accounts")
        .json(&json!({ "document_number": "668.959.320-70" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let account_id = response.json::<Value>()["account_id"].as_i64().unwrap();

    server
        .post("/accounts")
        .json(&json!({ "document_number": "66895932070" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let response = server
        .post("/transactions")
        .json(&json!({ "account_id": account_id, "operation_type_id": 4, "amount": 123.45 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["amount"].as_f64(), Some(123.45));

    let response = server
        .post("/transactions")
        .json(&json!({ "account_id": account_id, "operation_type_id": 4, "amount": "1000000000000000000.00" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert!(response.text().contains(r#""amount":1000000000000000000.00"#));

    let response = server
        .post("/transactions")
        .json(&json!({ "account_id": account_id + 1, "operation_type_id": 4, "amount": 1.15 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "account_id_not_found");
}

//! Server module for building the ledger HTTP server
//!
//! This module provides a `ServerBuilder` that wires the stores into the
//! account and transaction services and registers:
//! - Account and transaction routes
//! - Health check routes

pub mod builder;
pub mod extractor;
pub mod handlers;
pub mod router;
pub mod telemetry;

pub use builder::ServerBuilder;
pub use extractor::Payload;
pub use handlers::{AccountResponse, AppState, TransactionResponse};
pub use router::build_routes;

//! Typed error handling for the ledger
//!
//! Every failure the ledger can report to a client is a [`LedgerError`]: a
//! stable [`ErrorKind`] plus an optional wrapped cause. Errors are compared by
//! kind, never by identity, so callers can write
//! `err.is(ErrorKind::NotFound)` regardless of what caused it.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger::prelude::*;
//!
//! match service.get_by_id(42).await {
//!     Ok(account) => println!("Found: {}", account.document_number),
//!     Err(err) if err.is(ErrorKind::NotFound) => println!("no such account"),
//!     Err(err) => eprintln!("Other error: {}", err),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;

/// Boxed cause carried by a [`LedgerError`]
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Closed set of error categories exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request body is malformed or misses a required field
    InvalidPayload,

    /// Document number fails the CPF/CNPJ checksum
    InvalidDocumentNumber,

    /// A uniqueness constraint was violated
    Duplicated,

    /// Entity was not found
    NotFound,

    /// Operation type code is outside the registry
    InvalidOperationTypeId,

    /// Amount has the wrong sign or more than two decimal places
    InvalidAmount,

    /// Transaction references an account that does not exist
    AccountIdNotFound,

    /// Anything unclassified (storage I/O, poisoned locks, ...)
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPayload => "invalid_payload",
            ErrorKind::InvalidDocumentNumber => "invalid_document_number",
            ErrorKind::Duplicated => "duplicated",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidOperationTypeId => "invalid_operation_type_id",
            ErrorKind::InvalidAmount => "invalid_amount",
            ErrorKind::AccountIdNotFound => "account_id_not_found",
            ErrorKind::Internal => "internal_error",
        }
    }

    /// Human-readable message shown to clients
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPayload => "invalid payload",
            ErrorKind::InvalidDocumentNumber => "invalid document number",
            ErrorKind::Duplicated => "duplicated entity",
            ErrorKind::NotFound => "entity not found",
            ErrorKind::InvalidOperationTypeId => "invalid operation_type_id",
            ErrorKind::InvalidAmount => "invalid amount",
            ErrorKind::AccountIdNotFound => "account_id not found",
            ErrorKind::Internal => "internal server error",
        }
    }

    /// HTTP status code for this kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidPayload
            | ErrorKind::InvalidDocumentNumber
            | ErrorKind::InvalidOperationTypeId
            | ErrorKind::InvalidAmount
            | ErrorKind::AccountIdNotFound => StatusCode::BAD_REQUEST,
            ErrorKind::Duplicated => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The error type returned by every ledger operation
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct LedgerError {
    kind: ErrorKind,
    #[source]
    source: Option<BoxError>,
}

impl LedgerError {
    /// Create an error of the given kind without a cause
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create an error of the given kind wrapping its originating cause
    pub fn with_source(kind: ErrorKind, source: impl Into<BoxError>) -> Self {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    /// Wrap an unclassified failure
    pub fn internal(source: impl Into<BoxError>) -> Self {
        Self::with_source(ErrorKind::Internal, source)
    }

    pub fn invalid_payload() -> Self {
        Self::new(ErrorKind::InvalidPayload)
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Compare by kind
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.code()
    }

    /// Convert to the client-facing body (code + message, never the cause)
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.kind.code().to_string(),
            message: self.kind.message().to_string(),
        }
    }

    /// Full cause chain, for logs only
    pub fn cause_chain(&self) -> String {
        let mut chain = self.to_string();
        let mut current = StdError::source(self);
        while let Some(cause) = current {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            current = cause.source();
        }
        chain
    }
}

impl From<ErrorKind> for LedgerError {
    fn from(kind: ErrorKind) -> Self {
        LedgerError::new(kind)
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        if self.is(ErrorKind::Internal) {
            tracing::error!(error = %self.cause_chain(), "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self.cause_chain(), "request rejected");
        }

        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<validator::ValidationErrors> for LedgerError {
    fn from(err: validator::ValidationErrors) -> Self {
        LedgerError::with_source(ErrorKind::InvalidPayload, err)
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => LedgerError::with_source(ErrorKind::NotFound, err),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                LedgerError::with_source(ErrorKind::Duplicated, err)
            }
            _ => LedgerError::internal(err),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

//! Axum extractor for JSON request payloads
//!
//! `Payload<T>` behaves like `axum::Json<T>` but rejects malformed bodies
//! with the ledger's `invalid_payload` error instead of axum's plain-text
//! rejection.

use crate::core::error::{ErrorKind, LedgerError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor that maps every rejection to `InvalidPayload`
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_account(
///     State(state): State<AppState>,
///     Payload(request): Payload<CreateAccountRequest>,
/// ) -> Result<impl IntoResponse, LedgerError> {
///     // request is a typed, deserialized body
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = LedgerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(LedgerError::with_source(
                ErrorKind::InvalidPayload,
                rejection.body_text(),
            )),
        }
    }
}

//! Transaction entity (append-only ledger entry)

use crate::core::operation_type::OperationType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A posted ledger entry
///
/// Created once and never mutated. `id` is assigned by the store; an unsaved
/// transaction carries `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub operation_type: OperationType,
    pub amount: Decimal,
    pub event_date: DateTime<Utc>,
}

impl Transaction {
    /// Build an unsaved entry dated now
    pub fn new(account_id: i64, operation_type: OperationType, amount: Decimal) -> Self {
        Self {
            id: 0,
            account_id,
            operation_type,
            amount,
            event_date: Utc::now(),
        }
    }
}

//! Account entity

use chrono::{DateTime, Utc};

/// An account owning ledger entries
///
/// `id` is assigned by the store on creation; an unsaved account carries `0`.
/// `document_number` is always normalized (digits only) and checksum-valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub document_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build an unsaved account stamped with the current time
    pub fn new(document_number: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            document_number: document_number.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

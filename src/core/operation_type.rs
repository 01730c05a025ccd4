//! Closed registry of transaction operation types

use crate::core::error::{ErrorKind, LedgerError};
use std::fmt;

/// The four kinds of ledger entries
///
/// This is a closed set: adding a fifth type is a code change, not
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OperationType {
    CashPurchase = 1,
    Installment = 2,
    Withdraw = 3,
    Payment = 4,
}

impl OperationType {
    pub const ALL: [OperationType; 4] = [
        OperationType::CashPurchase,
        OperationType::Installment,
        OperationType::Withdraw,
        OperationType::Payment,
    ];

    /// Whether `code` names a registered operation type
    pub fn is_valid(code: i64) -> bool {
        (OperationType::CashPurchase.code() as i64..=OperationType::Payment.code() as i64)
            .contains(&code)
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Sign an amount must carry: `1` for payments, `-1` for debits
    pub fn expected_sign(self) -> i8 {
        match self {
            OperationType::Payment => 1,
            OperationType::CashPurchase | OperationType::Installment | OperationType::Withdraw => {
                -1
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OperationType::CashPurchase => "Normal Purchase",
            OperationType::Installment => "Purchase with installments",
            OperationType::Withdraw => "Withdrawal",
            OperationType::Payment => "Credit Voucher",
        }
    }
}

impl TryFrom<i64> for OperationType {
    type Error = LedgerError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(OperationType::CashPurchase),
            2 => Ok(OperationType::Installment),
            3 => Ok(OperationType::Withdraw),
            4 => Ok(OperationType::Payment),
            _ => Err(LedgerError::new(ErrorKind::InvalidOperationTypeId)),
        }
    }
}

impl From<OperationType> for i64 {
    fn from(operation_type: OperationType) -> Self {
        i64::from(operation_type.code())
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

use rust_decimal::Decimal;
use thiserror::Error;

/// Every way a ledger operation can be rejected.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("invalid purchase: {0}")]
    InvalidPurchase(String),
    #[error("invalid installment: {index} of {count}")]
    InvalidInstallment { index: u32, count: u32 },
    #[error("cannot divide proportionally: all limits are zero")]
    DegenerateAllocation,
    #[error("invalid limit {limit} for '{person}'")]
    InvalidLimit { person: String, limit: Decimal },
    #[error("unknown participant: '{0}'")]
    UnknownParticipant(String),
    #[error("unknown card: '{0}'")]
    UnknownCard(String),
    #[error("amount overflow while {0}")]
    Overflow(&'static str),
    #[error("purchase {0} not found")]
    NotFound(i64),
    #[error("store failure: {0:#}")]
    StoreFailure(anyhow::Error),
}

impl From<anyhow::Error> for LedgerError {
    fn from(err: anyhow::Error) -> Self {
        Self::StoreFailure(err)
    }
}

pub(crate) type LedgerResult<T> = std::result::Result<T, LedgerError>;

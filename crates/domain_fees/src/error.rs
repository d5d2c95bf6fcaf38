//! Fee domain errors

use core_kernel::{HawbId, MoneyError};
use thiserror::Error;

/// Errors that can occur in the fee domain
#[derive(Debug, Error)]
pub enum FeeError {
    /// Rejected before any computation runs, never after
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No fee share paired with waybill {hawb}")]
    UnpairedWaybill { hawb: HawbId },

    #[error("Duplicate waybill {hawb} in batch")]
    DuplicateWaybill { hawb: HawbId },

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl FeeError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        FeeError::InvalidInput(message.into())
    }
}

//! Document domain errors

use thiserror::Error;

/// Errors that can occur in the document domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Unknown document status: {0}")]
    UnknownStatus(String),
}

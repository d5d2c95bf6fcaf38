//! Document status workflow
//!
//! Documents start as Draft and move through an explicit transition table.
//! Confirmed and Rejected are terminal; re-confirming or re-rejecting a
//! settled document is an error rather than a silent no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;

/// Status of a cargo manifest or draft MAWB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Initial state on first upsert
    Draft,
    /// Awaiting review
    Pending,
    /// Accepted; terminal
    Confirmed,
    /// Declined; terminal
    Rejected,
}

impl DocumentStatus {
    /// Checks if the transition is allowed by the workflow table
    pub fn can_transition_to(&self, target: DocumentStatus) -> bool {
        use DocumentStatus::*;
        matches!(
            (self, target),
            (Draft, Pending)
                | (Draft, Confirmed)
                | (Draft, Rejected)
                | (Pending, Confirmed)
                | (Pending, Rejected)
        )
    }

    /// Validates the transition, returning the new status
    pub fn transition_to(self, target: DocumentStatus) -> Result<DocumentStatus, DocumentError> {
        if !self.can_transition_to(target) {
            return Err(DocumentError::InvalidStatusTransition {
                from: self.to_string(),
                to: target.to_string(),
            });
        }
        Ok(target)
    }

    /// True once no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Confirmed | DocumentStatus::Rejected)
    }

    /// Stable text form used in the database status column
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Confirmed => "confirmed",
            DocumentStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DocumentStatus::Draft),
            "pending" => Ok(DocumentStatus::Pending),
            "confirmed" => Ok(DocumentStatus::Confirmed),
            "rejected" => Ok(DocumentStatus::Rejected),
            other => Err(DocumentError::UnknownStatus(other.to_string())),
        }
    }
}

//! Core Kernel - Foundational types for the air-freight document system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers for freight documents

pub mod identifiers;
pub mod money;

pub use identifiers::{
    ChargeId, DimensionId, DraftItemId, DraftMawbId, HawbId, ManifestId, ManifestItemId, MawbId,
};
pub use money::{Currency, Money, MoneyError};

//! Fee domain - allocation and aggregation for house-waybill batches
//!
//! A master air waybill carries a batch of house waybills. Fixed customs and
//! handling fees are charged per declaration (a filing covering up to a fixed
//! number of waybills) and have to be split across the batch so that the
//! per-waybill shares sum back to the charged total exactly. This crate holds
//! that split, the chargeable-weight computation for draft items, and the
//! per-category charge summary.

pub mod allocation;
pub mod chargeable_weight;
pub mod error;
pub mod schedule;
pub mod summary;

pub use allocation::{allocate_batched, allocate_flat, FeeAllocation, FeeBatch};
pub use chargeable_weight::{chargeable_weight, ChargeableWeight, DimensionEntry, WeightUnit};
pub use error::FeeError;
pub use schedule::{FeeRates, FeeSchedule, WaybillFeeShare};
pub use summary::{summarize, BatchSummary, BucketSummary, CategoryBucket, WaybillRecord};

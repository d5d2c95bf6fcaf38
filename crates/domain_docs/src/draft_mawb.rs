//! Draft MAWB document
//!
//! The working copy of a master air waybill before it is issued. Items
//! carry box dimensions; their chargeable weight is computed from those
//! dimensions before the item is stored. A sibling charge collection holds
//! the rated charge lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ChargeId, Currency, DimensionId, DraftItemId, DraftMawbId, MawbId};
use domain_fees::chargeable_weight::{DimensionEntry, WeightUnit};

use crate::status::DocumentStatus;

/// Stored draft MAWB with its items and charges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftMawb {
    pub id: DraftMawbId,
    pub mawb_id: MawbId,
    pub mawb_number: String,
    pub shipper: String,
    pub consignee: String,
    pub departure_port: String,
    pub destination_port: String,
    pub currency: Currency,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Items in line-number order
    pub items: Vec<DraftItem>,
    /// Charge lines in line-number order
    pub charges: Vec<DraftCharge>,
}

/// One cargo line on a stored draft, with its computed billing weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftItem {
    pub id: DraftItemId,
    pub draft_id: DraftMawbId,
    pub line_no: i32,
    pub description: Option<String>,
    pub pieces: i32,
    pub gross_weight: Decimal,
    pub weight_unit: WeightUnit,
    /// Derived from the dimensions at write time, 3 decimal places
    pub total_volume_m3: Decimal,
    /// Derived from the dimensions at write time, 2 decimal places
    pub chargeable_weight_kg: Decimal,
    /// Dimension lines in entry order
    pub dims: Vec<ItemDimension>,
}

/// Stored box-dimension line nested under a draft item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDimension {
    pub id: DimensionId,
    pub item_id: DraftItemId,
    pub line_no: i32,
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    pub count: Decimal,
}

/// Stored charge line, sibling to the item list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftCharge {
    pub id: ChargeId,
    pub draft_id: DraftMawbId,
    pub line_no: i32,
    pub charge_code: String,
    pub description: Option<String>,
    pub amount: Decimal,
}

/// Draft MAWB payload supplied by the boundary layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDraftMawb {
    pub mawb_number: String,
    pub shipper: String,
    pub consignee: String,
    pub departure_port: String,
    pub destination_port: String,
    pub currency: Currency,
    pub items: Vec<NewDraftItem>,
    pub charges: Vec<NewDraftCharge>,
}

/// One cargo line of a draft payload; billing weight is derived, not supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDraftItem {
    pub description: Option<String>,
    pub pieces: i32,
    pub gross_weight: Decimal,
    pub weight_unit: WeightUnit,
    pub dims: Vec<DimensionEntry>,
}

/// One charge line of a draft payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDraftCharge {
    pub charge_code: String,
    pub description: Option<String>,
    pub amount: Decimal,
}

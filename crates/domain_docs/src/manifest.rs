//! Cargo manifest document
//!
//! The manifest lists every house waybill flown under one master air
//! waybill, with the tax fields customs assessed per waybill.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, ManifestId, ManifestItemId, MawbId};

use crate::status::DocumentStatus;

/// Stored cargo manifest with its items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoManifest {
    pub id: ManifestId,
    pub mawb_id: MawbId,
    pub mawb_number: String,
    pub flight_number: String,
    pub flight_date: NaiveDate,
    pub departure_port: String,
    pub destination_port: String,
    pub carrier: String,
    pub currency: Currency,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Items in line-number order
    pub items: Vec<ManifestItem>,
}

/// One house waybill line on a stored manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestItem {
    pub id: ManifestItemId,
    pub manifest_id: ManifestId,
    pub line_no: i32,
    pub hawb_number: String,
    pub pieces: i32,
    pub gross_weight_kg: Decimal,
    pub category_code: String,
    pub vat: Decimal,
    pub duty: Decimal,
    pub consignee: Option<String>,
    pub description: Option<String>,
}

/// Manifest payload supplied by the boundary layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewManifest {
    pub mawb_number: String,
    pub flight_number: String,
    pub flight_date: NaiveDate,
    pub departure_port: String,
    pub destination_port: String,
    pub carrier: String,
    pub currency: Currency,
    pub items: Vec<NewManifestItem>,
}

/// One house waybill line of a manifest payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewManifestItem {
    pub hawb_number: String,
    pub pieces: i32,
    pub gross_weight_kg: Decimal,
    pub category_code: String,
    pub vat: Decimal,
    pub duty: Decimal,
    pub consignee: Option<String>,
    pub description: Option<String>,
}

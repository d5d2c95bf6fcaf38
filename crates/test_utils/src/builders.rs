//! Builder patterns for test data construction
//!
//! Builders let tests specify only the relevant fields while using defaults
//! for everything else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Currency;
use domain_docs::{
    NewDraftCharge, NewDraftItem, NewDraftMawb, NewManifest, NewManifestItem,
};
use domain_fees::chargeable_weight::{DimensionEntry, WeightUnit};

use crate::fixtures::{DateFixtures, StringFixtures};

/// Builder for manifest payloads
pub struct NewManifestBuilder {
    manifest: NewManifest,
}

impl Default for NewManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: NewManifest {
                mawb_number: StringFixtures::mawb_number().to_string(),
                flight_number: StringFixtures::flight_number().to_string(),
                flight_date: DateFixtures::flight_date(),
                departure_port: StringFixtures::departure_port().to_string(),
                destination_port: StringFixtures::destination_port().to_string(),
                carrier: StringFixtures::carrier().to_string(),
                currency: Currency::CNY,
                items: Vec::new(),
            },
        }
    }

    pub fn with_flight_number(mut self, flight_number: impl Into<String>) -> Self {
        self.manifest.flight_number = flight_number.into();
        self
    }

    pub fn with_item(mut self, item: NewManifestItem) -> Self {
        self.manifest.items.push(item);
        self
    }

    /// Adds `count` items with generated house waybill numbers
    pub fn with_generated_items(mut self, count: usize) -> Self {
        for index in 0..count {
            self.manifest.items.push(NewManifestItem {
                hawb_number: format!("HWB{index:08}"),
                pieces: 1,
                gross_weight_kg: dec!(25.000),
                category_code: "2".to_string(),
                vat: dec!(13.00),
                duty: dec!(0.00),
                consignee: None,
                description: Some("general cargo".to_string()),
            });
        }
        self
    }

    pub fn build(self) -> NewManifest {
        self.manifest
    }
}

/// Builder for draft MAWB payloads
pub struct NewDraftMawbBuilder {
    draft: NewDraftMawb,
}

impl Default for NewDraftMawbBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewDraftMawbBuilder {
    pub fn new() -> Self {
        Self {
            draft: NewDraftMawb {
                mawb_number: StringFixtures::mawb_number().to_string(),
                shipper: "Guangzhou Forwarding Co".to_string(),
                consignee: "Amsterdam Logistics BV".to_string(),
                departure_port: StringFixtures::departure_port().to_string(),
                destination_port: StringFixtures::destination_port().to_string(),
                currency: Currency::CNY,
                items: Vec::new(),
                charges: Vec::new(),
            },
        }
    }

    pub fn with_item(mut self, item: NewDraftItem) -> Self {
        self.draft.items.push(item);
        self
    }

    pub fn with_charge(mut self, charge: NewDraftCharge) -> Self {
        self.draft.charges.push(charge);
        self
    }

    pub fn build(self) -> NewDraftMawb {
        self.draft
    }
}

/// Builder for draft item payloads
pub struct NewDraftItemBuilder {
    item: NewDraftItem,
}

impl Default for NewDraftItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewDraftItemBuilder {
    pub fn new() -> Self {
        Self {
            item: NewDraftItem {
                description: Some("general cargo".to_string()),
                pieces: 2,
                gross_weight: dec!(100),
                weight_unit: WeightUnit::Kg,
                dims: Vec::new(),
            },
        }
    }

    pub fn with_gross_weight(mut self, weight: Decimal, unit: WeightUnit) -> Self {
        self.item.gross_weight = weight;
        self.item.weight_unit = unit;
        self
    }

    pub fn with_dim(mut self, length: Decimal, width: Decimal, height: Decimal, count: Decimal) -> Self {
        self.item.dims.push(DimensionEntry {
            length,
            width,
            height,
            count,
        });
        self
    }

    pub fn build(self) -> NewDraftItem {
        self.item
    }
}

//! Property-based test data generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, HawbId, Money};
use domain_fees::chargeable_weight::DimensionEntry;
use domain_fees::summary::WaybillRecord;

/// Strategy for generating non-negative fee amounts in minor units
pub fn fee_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..10_000_00i64
}

/// Strategy for generating batch sizes
pub fn batch_size_strategy() -> impl Strategy<Value = u32> {
    1u32..500u32
}

/// Strategy for generating declaration capacities
pub fn declaration_capacity_strategy() -> impl Strategy<Value = u32> {
    1u32..100u32
}

/// Strategy for generating customs category codes, weighted toward the
/// recognized ones
pub fn category_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just("2".to_string()),
        3 => Just("3".to_string()),
        1 => "[0-9a-z]{1,2}",
    ]
}

/// Strategy for generating waybill tax records in CNY
pub fn waybill_record_strategy() -> impl Strategy<Value = WaybillRecord> {
    (category_code_strategy(), 0i64..100_000i64, 0i64..100_000i64).prop_map(
        |(category_code, vat_minor, duty_minor)| WaybillRecord {
            hawb_id: HawbId::new(),
            category_code,
            vat: Money::from_minor(vat_minor, Currency::CNY),
            duty: Money::from_minor(duty_minor, Currency::CNY),
        },
    )
}

/// Strategy for generating dimension entries, including non-positive lines
/// that the calculator must skip
pub fn dimension_entry_strategy() -> impl Strategy<Value = DimensionEntry> {
    (-10i64..500i64, 1i64..500i64, 1i64..500i64, 0i64..10i64).prop_map(
        |(length, width, height, count)| DimensionEntry {
            length: Decimal::new(length, 0),
            width: Decimal::new(width, 0),
            height: Decimal::new(height, 0),
            count: Decimal::new(count, 0),
        },
    )
}

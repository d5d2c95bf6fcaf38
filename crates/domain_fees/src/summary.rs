//! Category-wise charge summary
//!
//! Waybills carry a customs category code. Codes "2" and "3" are reported
//! separately; everything else lands in a catch-all bucket. Category 2
//! shipments are VAT-only; categories 3 and unrecognized codes carry duty
//! as well.

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, HawbId, Money};

use crate::error::FeeError;
use crate::schedule::FeeSchedule;

/// Tax fields of one house waybill, keyed by its id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaybillRecord {
    pub hawb_id: HawbId,
    pub category_code: String,
    pub vat: Money,
    pub duty: Money,
}

/// Reporting bucket a category code maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryBucket {
    Category2,
    Category3,
    Other,
}

impl CategoryBucket {
    /// Maps a raw customs category code to its bucket
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "2" => CategoryBucket::Category2,
            "3" => CategoryBucket::Category3,
            _ => CategoryBucket::Other,
        }
    }
}

/// Accumulated figures for one category bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSummary {
    pub waybill_count: u32,
    pub vat_total: Money,
    /// Accumulated for categories 3 and Other only
    pub duty_total: Money,
    /// Accumulated for categories 3 and Other only
    pub duty_plus_vat_total: Money,
    pub customs_fee_total: Money,
    pub overtime_fee_total: Money,
    pub bank_fee_total: Money,
    pub cargo_permit_fee_total: Money,
    pub express_fee_total: Money,
}

impl BucketSummary {
    fn empty(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            waybill_count: 0,
            vat_total: zero,
            duty_total: zero,
            duty_plus_vat_total: zero,
            customs_fee_total: zero,
            overtime_fee_total: zero,
            bank_fee_total: zero,
            cargo_permit_fee_total: zero,
            express_fee_total: zero,
        }
    }
}

/// Summary of a whole batch across the three category buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub category_2: BucketSummary,
    pub category_3: BucketSummary,
    pub other: BucketSummary,
    /// Category-2 VAT plus category-3 duty+VAT
    pub total_tax: Money,
    pub total_waybills: u32,
}

/// Aggregates waybill taxes and fee shares into per-category buckets
///
/// Pure aggregation over already-fetched data; every record must have a
/// share in the schedule.
pub fn summarize(
    records: &[WaybillRecord],
    schedule: &FeeSchedule,
    currency: Currency,
) -> Result<BatchSummary, FeeError> {
    let mut category_2 = BucketSummary::empty(currency);
    let mut category_3 = BucketSummary::empty(currency);
    let mut other = BucketSummary::empty(currency);

    for record in records {
        let share = schedule
            .share(&record.hawb_id)
            .ok_or(FeeError::UnpairedWaybill {
                hawb: record.hawb_id,
            })?;

        let bucket_kind = CategoryBucket::from_code(&record.category_code);
        let bucket = match bucket_kind {
            CategoryBucket::Category2 => &mut category_2,
            CategoryBucket::Category3 => &mut category_3,
            CategoryBucket::Other => &mut other,
        };

        bucket.waybill_count += 1;
        bucket.vat_total = bucket.vat_total.checked_add(&record.vat)?;
        if bucket_kind != CategoryBucket::Category2 {
            bucket.duty_total = bucket.duty_total.checked_add(&record.duty)?;
            bucket.duty_plus_vat_total = bucket
                .duty_plus_vat_total
                .checked_add(&record.duty)?
                .checked_add(&record.vat)?;
        }

        bucket.customs_fee_total = bucket.customs_fee_total.checked_add(&share.customs)?;
        if let Some(overtime) = share.overtime {
            bucket.overtime_fee_total = bucket.overtime_fee_total.checked_add(&overtime)?;
        }
        bucket.bank_fee_total = bucket.bank_fee_total.checked_add(&share.bank)?;
        bucket.cargo_permit_fee_total = bucket
            .cargo_permit_fee_total
            .checked_add(&share.cargo_permit)?;
        bucket.express_fee_total = bucket.express_fee_total.checked_add(&share.express)?;
    }

    let total_tax = category_2
        .vat_total
        .checked_add(&category_3.duty_plus_vat_total)?;
    let total_waybills =
        category_2.waybill_count + category_3.waybill_count + other.waybill_count;

    Ok(BatchSummary {
        category_2,
        category_3,
        other,
        total_tax,
        total_waybills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::FeeRates;
    use rust_decimal_macros::dec;

    fn cny(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::CNY)
    }

    fn record(code: &str, vat: rust_decimal::Decimal, duty: rust_decimal::Decimal) -> WaybillRecord {
        WaybillRecord {
            hawb_id: HawbId::new(),
            category_code: code.to_string(),
            vat: cny(vat),
            duty: cny(duty),
        }
    }

    fn schedule_for(records: &[WaybillRecord]) -> FeeSchedule {
        let ids: Vec<HawbId> = records.iter().map(|r| r.hawb_id).collect();
        let rates = FeeRates {
            customs_per_declaration: cny(dec!(200)),
            overtime_per_declaration: None,
            bank_per_declaration: cny(dec!(20)),
            cargo_permit_per_declaration: cny(dec!(100)),
            express_total: cny(dec!(60)),
            max_units_per_declaration: 40,
        };
        FeeSchedule::build(&ids, &rates).unwrap()
    }

    #[test]
    fn test_bucket_mapping() {
        assert_eq!(CategoryBucket::from_code("2"), CategoryBucket::Category2);
        assert_eq!(CategoryBucket::from_code("3"), CategoryBucket::Category3);
        assert_eq!(CategoryBucket::from_code(" 3 "), CategoryBucket::Category3);
        assert_eq!(CategoryBucket::from_code("9"), CategoryBucket::Other);
        assert_eq!(CategoryBucket::from_code(""), CategoryBucket::Other);
    }

    #[test]
    fn test_category_2_skips_duty() {
        let records = vec![record("2", dec!(13.00), dec!(5.00))];
        let schedule = schedule_for(&records);

        let summary = summarize(&records, &schedule, Currency::CNY).unwrap();

        assert_eq!(summary.category_2.waybill_count, 1);
        assert_eq!(summary.category_2.vat_total, cny(dec!(13.00)));
        assert_eq!(summary.category_2.duty_total, cny(dec!(0)));
        assert_eq!(summary.category_2.duty_plus_vat_total, cny(dec!(0)));
    }

    #[test]
    fn test_total_tax_formula() {
        let records = vec![
            record("2", dec!(13.00), dec!(99.00)),
            record("3", dec!(7.00), dec!(4.00)),
            record("x", dec!(1.00), dec!(1.00)),
        ];
        let schedule = schedule_for(&records);

        let summary = summarize(&records, &schedule, Currency::CNY).unwrap();

        // cat2 vat + cat3 (duty + vat); the Other bucket is excluded
        assert_eq!(summary.total_tax, cny(dec!(24.00)));
        assert_eq!(summary.total_waybills, 3);
        assert_eq!(summary.other.waybill_count, 1);
    }

    #[test]
    fn test_unpaired_waybill_is_an_error() {
        let records = vec![record("2", dec!(1.00), dec!(0))];
        let schedule = schedule_for(&records);

        let stranger = vec![record("2", dec!(1.00), dec!(0))];
        assert!(matches!(
            summarize(&stranger, &schedule, Currency::CNY),
            Err(FeeError::UnpairedWaybill { .. })
        ));
    }
}

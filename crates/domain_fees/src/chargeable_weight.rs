//! Chargeable weight computation
//!
//! Air freight bills the greater of actual (gross) and volumetric weight.
//! Volumetric weight derives from box dimensions via the industry divisor
//! (166.67 kg per m³). All arithmetic stays in `Decimal` so the stored
//! results carry no binary-float rounding drift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Kilograms of volumetric weight per cubic metre
const VOLUMETRIC_KG_PER_M3: Decimal = dec!(166.67);

/// Cubic centimetres per cubic metre
const CM3_PER_M3: Decimal = dec!(1_000_000);

/// Kilograms per pound
const KG_PER_LB: Decimal = dec!(0.453592);

/// Unit the gross weight was captured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

impl WeightUnit {
    /// Converts a weight in this unit to kilograms
    pub fn to_kg(&self, weight: Decimal) -> Decimal {
        match self {
            WeightUnit::Kg => weight,
            WeightUnit::Lb => weight * KG_PER_LB,
        }
    }
}

/// One line of box dimensions, in centimetres, with a box count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionEntry {
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    pub count: Decimal,
}

impl DimensionEntry {
    /// An entry only contributes volume when every field is strictly positive
    fn is_measurable(&self) -> bool {
        self.length > Decimal::ZERO
            && self.width > Decimal::ZERO
            && self.height > Decimal::ZERO
            && self.count > Decimal::ZERO
    }

    fn volume_m3(&self) -> Decimal {
        self.length * self.width * self.height / CM3_PER_M3 * self.count
    }
}

/// Computed volume and billing weight for one draft item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeableWeight {
    /// Total volume in cubic metres, 3 decimal places
    pub total_volume_m3: Decimal,
    /// Billing weight in kilograms, 2 decimal places
    pub chargeable_weight_kg: Decimal,
}

/// Derives the chargeable weight from box dimensions and gross weight
///
/// Entries with a zero or negative field are skipped rather than rejected;
/// operators routinely leave dimension lines blank.
pub fn chargeable_weight(
    dims: &[DimensionEntry],
    gross_weight: Decimal,
    unit: WeightUnit,
) -> ChargeableWeight {
    let total_volume_m3: Decimal = dims
        .iter()
        .filter(|entry| entry.is_measurable())
        .map(DimensionEntry::volume_m3)
        .sum();

    let volumetric_kg = total_volume_m3 * VOLUMETRIC_KG_PER_M3;
    let gross_kg = unit.to_kg(gross_weight);

    ChargeableWeight {
        total_volume_m3: total_volume_m3.round_dp(3),
        chargeable_weight_kg: gross_kg.max(volumetric_kg).round_dp(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(l: Decimal, w: Decimal, h: Decimal, c: Decimal) -> DimensionEntry {
        DimensionEntry {
            length: l,
            width: w,
            height: h,
            count: c,
        }
    }

    #[test]
    fn test_gross_weight_dominates() {
        let dims = vec![entry(dec!(100), dec!(50), dec!(30), dec!(2))];
        let result = chargeable_weight(&dims, dec!(100), WeightUnit::Kg);

        assert_eq!(result.total_volume_m3, dec!(0.300));
        assert_eq!(result.chargeable_weight_kg, dec!(100.00));
    }

    #[test]
    fn test_volumetric_weight_dominates() {
        let dims = vec![entry(dec!(100), dec!(100), dec!(100), dec!(1)); 4];
        let result = chargeable_weight(&dims, dec!(50), WeightUnit::Kg);

        assert_eq!(result.total_volume_m3, dec!(4.000));
        assert_eq!(result.chargeable_weight_kg, dec!(666.68));
    }

    #[test]
    fn test_non_positive_entries_skipped() {
        let dims = vec![
            entry(dec!(100), dec!(50), dec!(30), dec!(2)),
            entry(dec!(0), dec!(50), dec!(30), dec!(2)),
            entry(dec!(100), dec!(-50), dec!(30), dec!(2)),
            entry(dec!(100), dec!(50), dec!(30), dec!(0)),
        ];
        let result = chargeable_weight(&dims, dec!(10), WeightUnit::Kg);

        assert_eq!(result.total_volume_m3, dec!(0.300));
    }

    #[test]
    fn test_empty_dimensions_falls_back_to_gross() {
        let result = chargeable_weight(&[], dec!(123.4), WeightUnit::Kg);

        assert_eq!(result.total_volume_m3, dec!(0.000));
        assert_eq!(result.chargeable_weight_kg, dec!(123.40));
    }

    #[test]
    fn test_pounds_converted_to_kilograms() {
        let result = chargeable_weight(&[], dec!(100), WeightUnit::Lb);

        assert_eq!(result.chargeable_weight_kg, dec!(45.36));
    }

    #[test]
    fn test_chargeable_never_below_gross_kg() {
        let dims = vec![entry(dec!(10), dec!(10), dec!(10), dec!(1))];
        let result = chargeable_weight(&dims, dec!(75.5), WeightUnit::Kg);

        assert!(result.chargeable_weight_kg >= dec!(75.5));
    }
}

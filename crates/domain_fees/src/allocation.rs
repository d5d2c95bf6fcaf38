//! Declaration fee allocation
//!
//! Customs files one declaration per `max_units_per_declaration` house
//! waybills and charges a fixed fee per declaration. The charged total is
//! split across every waybill in the batch: each unit starts at the floored
//! per-unit amount and the remaining cents go to the leading units in input
//! order, so the shares always sum back to the total exactly and the split
//! is bit-for-bit reproducible.

use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::error::FeeError;

/// A batch of house waybills subject to a per-declaration fee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBatch {
    /// Number of house waybills in the batch
    pub total_units: u32,
    /// Fixed fee charged per customs declaration
    pub fee_per_declaration: Money,
    /// Maximum house waybills covered by a single declaration
    pub max_units_per_declaration: u32,
}

impl FeeBatch {
    /// Creates a batch, rejecting degenerate inputs up front
    pub fn new(
        total_units: u32,
        fee_per_declaration: Money,
        max_units_per_declaration: u32,
    ) -> Result<Self, FeeError> {
        if total_units == 0 {
            return Err(FeeError::invalid_input("total_units must be positive"));
        }
        if max_units_per_declaration == 0 {
            return Err(FeeError::invalid_input(
                "max_units_per_declaration must be positive",
            ));
        }
        if fee_per_declaration.is_negative() {
            return Err(FeeError::invalid_input(
                "fee_per_declaration must not be negative",
            ));
        }
        Ok(Self {
            total_units,
            fee_per_declaration,
            max_units_per_declaration,
        })
    }

    /// Number of declarations needed to cover the batch
    pub fn declarations(&self) -> u32 {
        self.total_units.div_ceil(self.max_units_per_declaration)
    }

    /// Total fee charged for the batch, at currency precision
    pub fn total_fee(&self) -> Money {
        self.fee_per_declaration
            .multiply(self.declarations().into())
            .round_to_currency()
    }
}

/// Result of splitting a fee total across a waybill batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeAllocation {
    /// Declaration count; `None` for the flat variant
    pub declarations: Option<u32>,
    /// The exact total that was distributed
    pub total_fee: Money,
    /// The floored per-unit amount every unit starts from
    pub floor_per_unit: Money,
    /// Per-unit shares in input order, each `floor` or `floor + 0.01`
    pub per_unit: Vec<Money>,
}

impl FeeAllocation {
    /// Number of units the fee was split across
    pub fn unit_count(&self) -> usize {
        self.per_unit.len()
    }
}

/// Splits a per-declaration fee across a batch of house waybills
pub fn allocate_batched(batch: &FeeBatch) -> Result<FeeAllocation, FeeError> {
    let total_fee = batch.total_fee();
    let mut allocation = split(total_fee, batch.total_units)?;
    allocation.declarations = Some(batch.declarations());
    Ok(allocation)
}

/// Splits one fixed total across a batch, with no declarations involved
pub fn allocate_flat(total_fee: Money, total_units: u32) -> Result<FeeAllocation, FeeError> {
    if total_fee.is_negative() {
        return Err(FeeError::invalid_input("total_fee must not be negative"));
    }
    split(total_fee.round_to_currency(), total_units)
}

fn split(total_fee: Money, total_units: u32) -> Result<FeeAllocation, FeeError> {
    if total_units == 0 {
        return Err(FeeError::invalid_input("total_units must be positive"));
    }

    let per_unit = total_fee.allocate(total_units)?;
    // Remainder cents land on the leading units, so the last unit always
    // holds the floored amount.
    let floor_per_unit = *per_unit
        .last()
        .expect("allocate returns one part per unit");

    Ok(FeeAllocation {
        declarations: None,
        total_fee,
        floor_per_unit,
        per_unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn cny(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::CNY)
    }

    #[test]
    fn test_single_unit_single_declaration() {
        let batch = FeeBatch::new(1, cny(dec!(200)), 40).unwrap();
        let allocation = allocate_batched(&batch).unwrap();

        assert_eq!(allocation.declarations, Some(1));
        assert_eq!(allocation.total_fee, cny(dec!(200.00)));
        assert_eq!(allocation.per_unit, vec![cny(dec!(200.00))]);
    }

    #[test]
    fn test_zero_units_fails_fast() {
        assert!(matches!(
            FeeBatch::new(0, cny(dec!(200)), 40),
            Err(FeeError::InvalidInput(_))
        ));
        assert!(matches!(
            allocate_flat(cny(dec!(100)), 0),
            Err(FeeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_max_units_fails_fast() {
        assert!(matches!(
            FeeBatch::new(10, cny(dec!(200)), 0),
            Err(FeeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_negative_fee_fails_fast() {
        assert!(matches!(
            FeeBatch::new(10, cny(dec!(-1)), 40),
            Err(FeeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_declaration_count_is_ceiling() {
        let batch = FeeBatch::new(45, cny(dec!(200)), 40).unwrap();
        assert_eq!(batch.declarations(), 2);

        let batch = FeeBatch::new(80, cny(dec!(200)), 40).unwrap();
        assert_eq!(batch.declarations(), 2);

        let batch = FeeBatch::new(81, cny(dec!(200)), 40).unwrap();
        assert_eq!(batch.declarations(), 3);
    }

    #[test]
    fn test_flat_split_has_no_declarations() {
        let allocation = allocate_flat(cny(dec!(100.00)), 3).unwrap();
        assert_eq!(allocation.declarations, None);
        assert_eq!(allocation.per_unit.len(), 3);
        assert_eq!(allocation.total_fee, cny(dec!(100.00)));
    }
}

//! Fee schedule for a waybill batch
//!
//! The allocators produce index-ordered shares; relying on callers to keep
//! those arrays aligned with the waybill list invites silent misalignment.
//! The schedule zips allocator output with the waybill ids exactly once, at
//! construction, and every later lookup goes by `HawbId`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{HawbId, Money};

use crate::allocation::{allocate_batched, allocate_flat, FeeAllocation, FeeBatch};
use crate::error::FeeError;

/// Rates charged against one batch
///
/// The first four categories are per-declaration fees; express delivery is
/// one flat amount divided across the whole batch. Overtime customs only
/// applies when the shipment cleared outside business hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRates {
    pub customs_per_declaration: Money,
    pub overtime_per_declaration: Option<Money>,
    pub bank_per_declaration: Money,
    pub cargo_permit_per_declaration: Money,
    pub express_total: Money,
    pub max_units_per_declaration: u32,
}

/// Every fee share owed by one house waybill, keyed by its id
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaybillFeeShare {
    pub hawb_id: HawbId,
    pub customs: Money,
    pub overtime: Option<Money>,
    pub bank: Money,
    pub cargo_permit: Money,
    pub express: Money,
}

/// All fee allocations for one batch, paired with waybill ids
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    shares: HashMap<HawbId, WaybillFeeShare>,
    pub customs: FeeAllocation,
    pub overtime: Option<FeeAllocation>,
    pub bank: FeeAllocation,
    pub cargo_permit: FeeAllocation,
    pub express: FeeAllocation,
}

impl FeeSchedule {
    /// Runs every fee category over the batch and pairs the shares with ids
    pub fn build(hawb_ids: &[HawbId], rates: &FeeRates) -> Result<Self, FeeError> {
        if hawb_ids.is_empty() {
            return Err(FeeError::invalid_input("batch contains no waybills"));
        }
        let total_units = hawb_ids.len() as u32;

        let customs = allocate_batched(&FeeBatch::new(
            total_units,
            rates.customs_per_declaration,
            rates.max_units_per_declaration,
        )?)?;
        let overtime = rates
            .overtime_per_declaration
            .map(|fee| {
                allocate_batched(&FeeBatch::new(
                    total_units,
                    fee,
                    rates.max_units_per_declaration,
                )?)
            })
            .transpose()?;
        let bank = allocate_batched(&FeeBatch::new(
            total_units,
            rates.bank_per_declaration,
            rates.max_units_per_declaration,
        )?)?;
        let cargo_permit = allocate_batched(&FeeBatch::new(
            total_units,
            rates.cargo_permit_per_declaration,
            rates.max_units_per_declaration,
        )?)?;
        let express = allocate_flat(rates.express_total, total_units)?;

        let mut shares = HashMap::with_capacity(hawb_ids.len());
        for (index, hawb_id) in hawb_ids.iter().copied().enumerate() {
            let share = WaybillFeeShare {
                hawb_id,
                customs: customs.per_unit[index],
                overtime: overtime.as_ref().map(|a| a.per_unit[index]),
                bank: bank.per_unit[index],
                cargo_permit: cargo_permit.per_unit[index],
                express: express.per_unit[index],
            };
            if shares.insert(hawb_id, share).is_some() {
                return Err(FeeError::DuplicateWaybill { hawb: hawb_id });
            }
        }

        debug!(
            waybills = hawb_ids.len(),
            declarations = ?customs.declarations,
            overtime_applied = overtime.is_some(),
            "built fee schedule"
        );

        Ok(Self {
            shares,
            customs,
            overtime,
            bank,
            cargo_permit,
            express,
        })
    }

    /// Looks up the fee share for one waybill
    pub fn share(&self, hawb_id: &HawbId) -> Option<&WaybillFeeShare> {
        self.shares.get(hawb_id)
    }

    /// True when overtime customs applies to this batch
    pub fn overtime_applied(&self) -> bool {
        self.overtime.is_some()
    }
}

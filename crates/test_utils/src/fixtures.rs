//! Pre-built test data for common entities

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_fees::schedule::FeeRates;

/// Money values used across tests
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn customs_fee() -> Money {
        Money::new(dec!(200), Currency::CNY)
    }

    pub fn overtime_fee() -> Money {
        Money::new(dec!(50), Currency::CNY)
    }

    pub fn bank_fee() -> Money {
        Money::new(dec!(20), Currency::CNY)
    }

    pub fn cargo_permit_fee() -> Money {
        Money::new(dec!(100), Currency::CNY)
    }

    pub fn express_total() -> Money {
        Money::new(dec!(60), Currency::CNY)
    }
}

/// Fee rates as charged by the default customs broker
pub struct RateFixtures;

impl RateFixtures {
    /// Standard rates, overtime customs not applied
    pub fn standard() -> FeeRates {
        FeeRates {
            customs_per_declaration: MoneyFixtures::customs_fee(),
            overtime_per_declaration: None,
            bank_per_declaration: MoneyFixtures::bank_fee(),
            cargo_permit_per_declaration: MoneyFixtures::cargo_permit_fee(),
            express_total: MoneyFixtures::express_total(),
            max_units_per_declaration: 40,
        }
    }

    /// Standard rates with overtime customs applied
    pub fn with_overtime() -> FeeRates {
        FeeRates {
            overtime_per_declaration: Some(MoneyFixtures::overtime_fee()),
            ..Self::standard()
        }
    }
}

/// String values used across tests
pub struct StringFixtures;

impl StringFixtures {
    pub fn mawb_number() -> &'static str {
        "784-12345675"
    }

    pub fn hawb_number() -> &'static str {
        "HWB00012345"
    }

    pub fn flight_number() -> &'static str {
        "CZ3101"
    }

    pub fn carrier() -> &'static str {
        "CZ"
    }

    pub fn departure_port() -> &'static str {
        "CAN"
    }

    pub fn destination_port() -> &'static str {
        "AMS"
    }
}

/// Date values used across tests
pub struct DateFixtures;

impl DateFixtures {
    pub fn flight_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }
}

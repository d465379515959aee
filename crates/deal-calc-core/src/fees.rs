//! Manufacturer lease fees keyed by vehicle make.
//!
//! Captive lenders charge an acquisition fee when the lease is written and a
//! disposition fee when the vehicle is returned. The engine only needs the two
//! amounts for a make, so everything it consumes goes through [`FeeSchedule`].
//! A built-in table covers the common makes; [`FeeTable`] lets callers supply
//! their own (typically deserialised from a config file).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;
use crate::DealResult;

/// Acquisition and disposition fee for one make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeFees {
    pub acquisition_fee: Money,
    pub disposition_fee: Money,
}

/// Read-only make -> fee lookup. Unknown or empty makes yield zero fees.
pub trait FeeSchedule {
    fn fees_for(&self, make: &str) -> MakeFees;
}

impl<T: FeeSchedule + ?Sized> FeeSchedule for &T {
    fn fees_for(&self, make: &str) -> MakeFees {
        (**self).fees_for(make)
    }
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

const STANDARD_TABLE: &[(&str, Decimal, Decimal)] = &[
    ("Acura", dec!(595), dec!(350)),
    ("Alfa Romeo", dec!(595), dec!(395)),
    ("Audi", dec!(895), dec!(495)),
    ("BMW", dec!(925), dec!(350)),
    ("Buick", dec!(695), dec!(395)),
    ("Cadillac", dec!(695), dec!(395)),
    ("Chevrolet", dec!(695), dec!(395)),
    ("Chrysler", dec!(595), dec!(395)),
    ("Dodge", dec!(595), dec!(395)),
    ("Ford", dec!(645), dec!(395)),
    ("Genesis", dec!(695), dec!(400)),
    ("GMC", dec!(695), dec!(395)),
    ("Honda", dec!(595), dec!(350)),
    ("Hyundai", dec!(650), dec!(400)),
    ("Infiniti", dec!(700), dec!(395)),
    ("Jaguar", dec!(695), dec!(395)),
    ("Jeep", dec!(595), dec!(395)),
    ("Kia", dec!(695), dec!(400)),
    ("Land Rover", dec!(695), dec!(395)),
    ("Lexus", dec!(650), dec!(350)),
    ("Lincoln", dec!(645), dec!(395)),
    ("Mazda", dec!(695), dec!(350)),
    ("Mercedes-Benz", dec!(795), dec!(595)),
    ("MINI", dec!(925), dec!(350)),
    ("Mitsubishi", dec!(695), dec!(350)),
    ("Nissan", dec!(700), dec!(395)),
    ("Porsche", dec!(1095), dec!(595)),
    ("Ram", dec!(595), dec!(395)),
    ("Subaru", dec!(595), dec!(350)),
    ("Toyota", dec!(650), dec!(350)),
    ("Volkswagen", dec!(695), dec!(395)),
    ("Volvo", dec!(995), dec!(350)),
];

fn same_make(candidate: &str, make: &str) -> bool {
    candidate.eq_ignore_ascii_case(make.trim())
}

/// Fees published by the captive lenders of the common makes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFees;

impl FeeSchedule for StandardFees {
    fn fees_for(&self, make: &str) -> MakeFees {
        STANDARD_TABLE
            .iter()
            .find(|(name, _, _)| same_make(name, make))
            .map(|&(_, acquisition_fee, disposition_fee)| MakeFees {
                acquisition_fee,
                disposition_fee,
            })
            .unwrap_or_else(|| {
                if !make.trim().is_empty() {
                    tracing::debug!(make, "make not in standard fee table, using zero fees");
                }
                MakeFees::default()
            })
    }
}

/// Schedule that never charges lender fees.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFees;

impl FeeSchedule for NoFees {
    fn fees_for(&self, _make: &str) -> MakeFees {
        MakeFees::default()
    }
}

// ---------------------------------------------------------------------------
// Configurable table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeFeeEntry {
    pub make: String,
    #[serde(default)]
    pub acquisition_fee: Money,
    #[serde(default)]
    pub disposition_fee: Money,
}

/// A fee schedule loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeTable {
    pub makes: Vec<MakeFeeEntry>,
}

impl FeeTable {
    /// The built-in table as an editable value.
    pub fn standard() -> Self {
        FeeTable {
            makes: STANDARD_TABLE
                .iter()
                .map(|&(make, acquisition_fee, disposition_fee)| MakeFeeEntry {
                    make: make.to_string(),
                    acquisition_fee,
                    disposition_fee,
                })
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> DealResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FeeSchedule for FeeTable {
    fn fees_for(&self, make: &str) -> MakeFees {
        self.makes
            .iter()
            .find(|entry| same_make(&entry.make, make))
            .map(|entry| MakeFees {
                acquisition_fee: entry.acquisition_fee,
                disposition_fee: entry.disposition_fee,
            })
            .unwrap_or_default()
    }
}

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_cents, round_whole, Money, Percent};

/// Contractual value of the vehicle at lease end, in both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualValue {
    pub absolute: Money,
    pub percent_of_msrp: Percent,
}

impl ResidualValue {
    /// Resolve a quoted residual, given either as a percentage of MSRP or as
    /// an absolute amount. `msrp` must be non-zero.
    pub fn resolve(msrp: Money, quoted: Money, is_percent: bool) -> Self {
        if is_percent {
            ResidualValue {
                absolute: msrp * (quoted / dec!(100)),
                percent_of_msrp: quoted,
            }
        } else {
            ResidualValue {
                absolute: quoted,
                percent_of_msrp: quoted / msrp * dec!(100),
            }
        }
    }

    /// Absolute residual, to the cent.
    pub fn reported_value(&self) -> Money {
        round_cents(self.absolute)
    }

    /// Residual as a whole percentage of MSRP.
    pub fn reported_percent(&self) -> Percent {
        round_whole(self.percent_of_msrp)
    }
}

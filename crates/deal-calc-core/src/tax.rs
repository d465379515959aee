//! Sales-tax treatment of a lease.
//!
//! US states tax leases in one of three ways. Each policy defines two taxable
//! bases: the recurring base, taxed over the life of the lease, and the
//! drive-off base, taxed at signing. They are distinct tax events even under
//! the same policy, so both are defined per variant here and nowhere else.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxPolicy {
    /// Tax is charged on each monthly payment.
    #[default]
    #[serde(alias = "TAX_ON_MONTHLY_PAYMENT")]
    OnMonthlyPayment,
    /// Tax is charged upfront on the full selling price.
    #[serde(alias = "TAX_ON_SALES_PRICE")]
    OnSalesPrice,
    /// Tax is charged upfront on the sum of all lease payments.
    #[serde(alias = "TAX_ON_TOTAL_LEASE_PAYMENT")]
    OnTotalLeasePayment,
}

/// The amounts a taxable base can draw from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxableAmounts {
    pub pre_tax_payment: Money,
    pub term_months: u32,
    pub selling_price: Money,
    pub down_payment: Money,
    pub total_fees: Money,
    pub rebates: Money,
    pub acquisition_fee: Money,
    pub disposition_fee: Money,
    pub zero_driveoff: bool,
}

impl TaxableAmounts {
    fn total_of_payments(&self) -> Money {
        self.pre_tax_payment * Decimal::from(self.term_months)
    }
}

impl TaxPolicy {
    pub const ALL: [TaxPolicy; 3] = [
        TaxPolicy::OnMonthlyPayment,
        TaxPolicy::OnSalesPrice,
        TaxPolicy::OnTotalLeasePayment,
    ];

    /// Whether the recurring tax is added to each monthly payment. Under the
    /// other policies tax is settled upfront (or capitalized) instead.
    pub fn taxes_recurring_payment(self) -> bool {
        matches!(self, TaxPolicy::OnMonthlyPayment)
    }

    /// Base for the tax carried by the payment stream.
    pub fn recurring_taxable_base(self, amounts: &TaxableAmounts) -> Money {
        match self {
            TaxPolicy::OnMonthlyPayment => {
                // Rebates are taxed with the payment once nothing is due at signing.
                let rebates = if amounts.zero_driveoff {
                    amounts.rebates
                } else {
                    Decimal::ZERO
                };
                amounts.pre_tax_payment + rebates
            }
            TaxPolicy::OnSalesPrice => amounts.selling_price,
            TaxPolicy::OnTotalLeasePayment => {
                amounts.total_of_payments()
                    + amounts.down_payment
                    + amounts.total_fees
                    + amounts.acquisition_fee
                    + amounts.disposition_fee
            }
        }
    }

    /// Base for the tax collected at signing.
    pub fn drive_off_taxable_base(self, amounts: &TaxableAmounts) -> Money {
        match self {
            TaxPolicy::OnMonthlyPayment => {
                amounts.down_payment
                    + amounts.total_fees
                    + amounts.rebates
                    + amounts.acquisition_fee
            }
            TaxPolicy::OnSalesPrice => amounts.selling_price,
            TaxPolicy::OnTotalLeasePayment => {
                amounts.total_of_payments()
                    + amounts.down_payment
                    + amounts.total_fees
                    + amounts.rebates
                    + amounts.acquisition_fee
                    + amounts.disposition_fee
            }
        }
    }

    pub fn recurring_tax(self, amounts: &TaxableAmounts, sales_tax_percent: Percent) -> Money {
        tax_on(self.recurring_taxable_base(amounts), sales_tax_percent)
    }

    pub fn drive_off_tax(self, amounts: &TaxableAmounts, sales_tax_percent: Percent) -> Money {
        tax_on(self.drive_off_taxable_base(amounts), sales_tax_percent)
    }

    fn as_str(self) -> &'static str {
        match self {
            TaxPolicy::OnMonthlyPayment => "on_monthly_payment",
            TaxPolicy::OnSalesPrice => "on_sales_price",
            TaxPolicy::OnTotalLeasePayment => "on_total_lease_payment",
        }
    }
}

/// Tax owed on `base` at a rate quoted in percent.
pub fn tax_on(base: Money, sales_tax_percent: Percent) -> Money {
    base * (sales_tax_percent / dec!(100))
}

impl fmt::Display for TaxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let normalized = normalized.strip_prefix("tax_").unwrap_or(normalized.as_str());
        match normalized {
            "on_monthly_payment" | "monthly" => Ok(TaxPolicy::OnMonthlyPayment),
            "on_sales_price" | "sales_price" => Ok(TaxPolicy::OnSalesPrice),
            "on_total_lease_payment" | "total_lease_payment" => {
                Ok(TaxPolicy::OnTotalLeasePayment)
            }
            _ => Err(format!(
                "unknown tax policy '{s}' (expected on_monthly_payment, on_sales_price or on_total_lease_payment)"
            )),
        }
    }
}

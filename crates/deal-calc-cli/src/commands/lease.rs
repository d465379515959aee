use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use deal_calc_core::fees::FeeTable;
use deal_calc_core::lease::{self, LeaseInput};
use deal_calc_core::tax::TaxPolicy;
use deal_calc_core::time_value::money_factor_from_apr;

use crate::input;

/// Arguments for lease pricing
#[derive(Args)]
pub struct LeaseArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Vehicle make, used to look up lender fees
    #[arg(long, default_value = "")]
    pub make: String,

    /// Manufacturer's suggested retail price
    #[arg(long)]
    pub msrp: Option<Decimal>,

    /// Negotiated selling price
    #[arg(long)]
    pub selling_price: Option<Decimal>,

    /// Residual value, as a percentage of MSRP unless --residual-is-amount
    #[arg(long, alias = "rv")]
    pub residual_value: Option<Decimal>,

    /// Treat --residual-value as an absolute amount
    #[arg(long)]
    pub residual_is_amount: bool,

    /// Money factor
    #[arg(long, alias = "mf", conflicts_with = "lease_apr")]
    pub money_factor: Option<Decimal>,

    /// Lease APR in percent, converted to a money factor
    #[arg(long)]
    pub lease_apr: Option<Decimal>,

    /// Lease term in months
    #[arg(long, default_value_t = 36)]
    pub term: u32,

    /// Sales tax in percent
    #[arg(long)]
    pub sales_tax: Option<Decimal>,

    /// Dealer and government fees
    #[arg(long)]
    pub total_fees: Option<Decimal>,

    /// Dealer and manufacturer rebates
    #[arg(long)]
    pub rebates: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Tax policy: on_monthly_payment, on_sales_price or on_total_lease_payment
    #[arg(long, default_value = "on_monthly_payment")]
    pub tax_policy: TaxPolicy,

    /// Capitalize fees and tax so nothing is due at signing
    #[arg(long)]
    pub zero_driveoff: bool,
}

pub fn run_lease(args: LeaseArgs, fees: &FeeTable) -> Result<Value, Box<dyn std::error::Error>> {
    let lease_input: LeaseInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let money_factor = args
            .money_factor
            .or(args.lease_apr.map(money_factor_from_apr))
            .unwrap_or_default();
        // Missing required amounts are left at zero and reported by validation.
        LeaseInput {
            make: args.make,
            msrp: args.msrp.unwrap_or_default(),
            selling_price: args.selling_price.unwrap_or_default(),
            residual_value: args.residual_value.unwrap_or_default(),
            is_residual_percent: !args.residual_is_amount,
            money_factor,
            lease_term_months: args.term,
            sales_tax_percent: args.sales_tax.unwrap_or(Decimal::ZERO),
            total_fees: args.total_fees.unwrap_or(Decimal::ZERO),
            rebates: args.rebates.unwrap_or(Decimal::ZERO),
            down_payment: args.down_payment.unwrap_or(Decimal::ZERO),
            tax_policy: args.tax_policy,
            zero_driveoff: args.zero_driveoff,
        }
    };
    let result = lease::lease_report(&lease_input, fees)?;
    Ok(serde_json::to_value(result)?)
}

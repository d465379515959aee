use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use deal_calc_core::finance::{self, FinanceInput};

use crate::input;

/// Arguments for loan pricing
#[derive(Args)]
pub struct FinanceArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Vehicle make
    #[arg(long, default_value = "")]
    pub make: String,

    /// Negotiated selling price
    #[arg(long)]
    pub selling_price: Option<Decimal>,

    /// Annual percentage rate, in percent
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Sales tax in percent
    #[arg(long)]
    pub sales_tax: Option<Decimal>,

    /// Dealer fees subject to sales tax
    #[arg(long)]
    pub taxable_fees: Option<Decimal>,

    /// Government fees not subject to sales tax
    #[arg(long)]
    pub untaxable_fees: Option<Decimal>,

    /// Manufacturer rebates
    #[arg(long)]
    pub rebates: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Trade-in value
    #[arg(long)]
    pub trade_in: Option<Decimal>,
}

pub fn run_finance(args: FinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let finance_input: FinanceInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FinanceInput {
            make: args.make,
            selling_price: args.selling_price.unwrap_or_default(),
            sales_tax_percent: args.sales_tax.unwrap_or(Decimal::ZERO),
            rebates: args.rebates.unwrap_or(Decimal::ZERO),
            down_payment: args.down_payment.unwrap_or(Decimal::ZERO),
            taxable_fees: args.taxable_fees.unwrap_or(Decimal::ZERO),
            untaxable_fees: args.untaxable_fees.unwrap_or(Decimal::ZERO),
            apr: args.apr.unwrap_or_default(),
            finance_term_months: args.term.unwrap_or_default(),
            trade_in: args.trade_in.unwrap_or(Decimal::ZERO),
        }
    };
    let result = finance::finance_report(&finance_input)?;
    Ok(serde_json::to_value(result)?)
}

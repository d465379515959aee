use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DealError;
use crate::tax::tax_on;
use crate::time_value::{annuity_payment, monthly_rate};
use crate::types::{round_cents, with_metadata, ComputationOutput, Money, Percent};
use crate::DealResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Negotiated terms of a retail installment loan.
///
/// As with leases, required fields default to zero when absent and are
/// rejected by validation under their deal-sheet names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceInput {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub selling_price: Money,
    #[serde(default)]
    pub sales_tax_percent: Percent,
    #[serde(default)]
    pub rebates: Money,
    #[serde(default)]
    pub down_payment: Money,
    /// Dealer fees subject to sales tax
    #[serde(default)]
    pub taxable_fees: Money,
    /// Government fees, not taxed
    #[serde(default)]
    pub untaxable_fees: Money,
    /// Annual percentage rate, in percent
    #[serde(default)]
    pub apr: Percent,
    #[serde(default)]
    pub finance_term_months: u32,
    #[serde(default)]
    pub trade_in: Money,
}

/// Every reported loan figure, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceReport {
    pub amount_financed: Money,
    pub monthly_payment: Money,
    pub total_cost: Money,
    pub total_interest: Money,
}

/// A priced loan, at full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceQuote {
    input: FinanceInput,
    amount_financed: Money,
    monthly_payment: Money,
    total_cost: Money,
}

impl FinanceQuote {
    pub fn input(&self) -> &FinanceInput {
        &self.input
    }

    /// Selling price plus fees and taxes, less down payment, trade-in and rebates.
    pub fn amount_financed(&self) -> Money {
        round_cents(self.amount_financed)
    }

    pub fn monthly_payment(&self) -> Money {
        round_cents(self.monthly_payment)
    }

    /// All payments plus down payment and trade-in value.
    pub fn total_cost(&self) -> Money {
        round_cents(self.total_cost)
    }

    pub fn total_interest(&self) -> Money {
        round_cents(
            self.total_cost
                - self.amount_financed
                - self.input.down_payment
                - self.input.trade_in,
        )
    }

    pub fn report(&self) -> FinanceReport {
        FinanceReport {
            amount_financed: self.amount_financed(),
            monthly_payment: self.monthly_payment(),
            total_cost: self.total_cost(),
            total_interest: self.total_interest(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn calculate_finance(input: &FinanceInput) -> DealResult<FinanceQuote> {
    validate_input(input)?;

    let amount_financed = input.selling_price
        - input.down_payment
        - input.trade_in
        - input.rebates
        + input.untaxable_fees
        + input.taxable_fees
        + tax_on(input.taxable_fees, input.sales_tax_percent)
        + tax_on(input.selling_price, input.sales_tax_percent);

    let term = input.finance_term_months;
    let monthly_payment = annuity_payment(monthly_rate(input.apr), term, amount_financed)?;
    let total_cost = monthly_payment * Decimal::from(term) + input.down_payment + input.trade_in;

    tracing::debug!(
        amount_financed = %amount_financed,
        monthly_payment = %monthly_payment,
        term,
        "finance amortization"
    );

    Ok(FinanceQuote {
        input: input.clone(),
        amount_financed,
        monthly_payment,
        total_cost,
    })
}

/// Price a loan and wrap the rounded report in the standard output envelope.
pub fn finance_report(input: &FinanceInput) -> DealResult<ComputationOutput<FinanceReport>> {
    let start = Instant::now();
    let quote = calculate_finance(input)?;

    let mut warnings: Vec<String> = Vec::new();
    if quote.amount_financed <= Decimal::ZERO {
        warnings.push(
            "Down payment, trade-in and rebates cover the whole price; nothing is financed."
                .into(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "compounding": "monthly",
        "monthly_rate": "apr / 100 / 12",
        "taxed": ["selling_price", "taxable_fees"],
        "payment_timing": "end of period",
    });

    Ok(with_metadata(
        "Fully amortizing fixed-rate installment loan",
        &assumptions,
        warnings,
        elapsed,
        quote.report(),
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &FinanceInput) -> DealResult<()> {
    if input.selling_price <= Decimal::ZERO {
        return Err(DealError::invalid("Selling Price", "must be greater than zero"));
    }
    if input.apr <= Decimal::ZERO {
        return Err(DealError::invalid("APR", "must be greater than zero"));
    }
    if input.finance_term_months == 0 {
        return Err(DealError::invalid("Finance Term", "must be at least one month"));
    }
    Ok(())
}

//! Lease payment computation.
//!
//! A lease payment has two parts: the base payment, which amortizes the
//! depreciation (net capitalized cost less residual) over the term, and the
//! rent charge, the money factor applied to net capitalized cost plus
//! residual. Sales tax is layered on top according to the [`TaxPolicy`].
//!
//! Under a zero drive-off structure nothing is paid at signing: fees and the
//! acquisition fee are capitalized, the first payment is folded into the
//! remaining `term - 1` months, and the tax computed from the first pass is
//! itself capitalized before a second and final pass.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::quote::{LeaseQuote, LeaseReport};
use super::residual::ResidualValue;
use crate::error::DealError;
use crate::fees::{FeeSchedule, MakeFees, StandardFees};
use crate::tax::{TaxPolicy, TaxableAmounts};
use crate::time_value::apr_from_money_factor;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::DealResult;

const DEFAULT_LEASE_TERM_MONTHS: u32 = 36;
const HIGH_APR_WARNING_THRESHOLD: Percent = dec!(30);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Negotiated lease terms.
///
/// Required amounts default to zero when absent so that a missing field is
/// reported by validation under its deal-sheet name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseInput {
    /// Vehicle make, used to look up lender fees
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub msrp: Money,
    /// Negotiated selling price (capitalized cost before fees)
    #[serde(default)]
    pub selling_price: Money,
    /// Residual, as a percentage of MSRP or an absolute amount
    #[serde(default)]
    pub residual_value: Money,
    #[serde(default = "default_true")]
    pub is_residual_percent: bool,
    #[serde(default)]
    pub money_factor: Rate,
    #[serde(default = "default_lease_term")]
    pub lease_term_months: u32,
    #[serde(default)]
    pub sales_tax_percent: Percent,
    /// Dealer and government fees
    #[serde(default)]
    pub total_fees: Money,
    #[serde(default)]
    pub rebates: Money,
    #[serde(default)]
    pub down_payment: Money,
    #[serde(default)]
    pub tax_policy: TaxPolicy,
    /// Capitalize fees and tax so nothing is due at signing
    #[serde(default)]
    pub zero_driveoff: bool,
}

fn default_true() -> bool {
    true
}

fn default_lease_term() -> u32 {
    DEFAULT_LEASE_TERM_MONTHS
}

impl Default for LeaseInput {
    fn default() -> Self {
        LeaseInput {
            make: String::new(),
            msrp: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            residual_value: Decimal::ZERO,
            is_residual_percent: true,
            money_factor: Decimal::ZERO,
            lease_term_months: DEFAULT_LEASE_TERM_MONTHS,
            sales_tax_percent: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            rebates: Decimal::ZERO,
            down_payment: Decimal::ZERO,
            tax_policy: TaxPolicy::default(),
            zero_driveoff: false,
        }
    }
}

impl LeaseInput {
    /// Months over which depreciation is amortized. The first payment is
    /// capitalized under zero drive-off, leaving one fewer month.
    pub fn amortization_months(&self) -> u32 {
        if self.zero_driveoff {
            self.lease_term_months.saturating_sub(1)
        } else {
            self.lease_term_months
        }
    }
}

// ---------------------------------------------------------------------------
// Payment passes
// ---------------------------------------------------------------------------

/// One evaluation of the payment formula at a given net capitalized cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPass {
    pub net_cap_cost: Money,
    pub depreciation: Money,
    pub base_payment: Money,
    pub rent_charge: Money,
    pub pre_tax_payment: Money,
}

/// Evaluate base payment and rent charge. `amortization_months` must be non-zero.
pub fn payment_pass(
    net_cap_cost: Money,
    residual: Money,
    money_factor: Rate,
    amortization_months: u32,
) -> PaymentPass {
    let depreciation = net_cap_cost - residual;
    let base_payment = depreciation / Decimal::from(amortization_months);
    let rent_charge = (net_cap_cost + residual) * money_factor;
    PaymentPass {
        net_cap_cost,
        depreciation,
        base_payment,
        rent_charge,
        pre_tax_payment: base_payment + rent_charge,
    }
}

/// Everything resolved before the first payment pass.
#[derive(Debug, Clone)]
pub(crate) struct LeaseTerms<'a> {
    pub input: &'a LeaseInput,
    pub fees: MakeFees,
    pub residual: ResidualValue,
}

impl LeaseTerms<'_> {
    /// Selling price plus anything capitalized, less reductions.
    pub fn net_cap_cost(&self) -> Money {
        let input = self.input;
        let gross_cap_cost = if input.zero_driveoff {
            input.selling_price + input.total_fees + self.fees.acquisition_fee
        } else {
            input.selling_price
        };
        let cap_cost_reduction = if input.zero_driveoff {
            input.rebates
        } else {
            input.rebates + input.down_payment
        };
        gross_cap_cost - cap_cost_reduction
    }

    pub fn pass_at(&self, net_cap_cost: Money) -> PaymentPass {
        payment_pass(
            net_cap_cost,
            self.residual.absolute,
            self.input.money_factor,
            self.input.amortization_months(),
        )
    }

    pub fn taxable_amounts(&self, pre_tax_payment: Money) -> TaxableAmounts {
        let input = self.input;
        TaxableAmounts {
            pre_tax_payment,
            term_months: input.lease_term_months,
            selling_price: input.selling_price,
            down_payment: input.down_payment,
            total_fees: input.total_fees,
            rebates: input.rebates,
            acquisition_fee: self.fees.acquisition_fee,
            disposition_fee: self.fees.disposition_fee,
            zero_driveoff: input.zero_driveoff,
        }
    }
}

/// First pass and the recurring tax it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BaseComputation {
    pub pass: PaymentPass,
    pub tax: Money,
}

/// Final pass and the payment the lessee actually makes each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FinalComputation {
    pub pass: PaymentPass,
    pub monthly_payment: Money,
}

pub(crate) fn compute_base(terms: &LeaseTerms<'_>) -> BaseComputation {
    let pass = terms.pass_at(terms.net_cap_cost());
    let tax = terms.input.tax_policy.recurring_tax(
        &terms.taxable_amounts(pass.pre_tax_payment),
        terms.input.sales_tax_percent,
    );
    tracing::debug!(
        net_cap_cost = %pass.net_cap_cost,
        pre_tax_payment = %pass.pre_tax_payment,
        tax = %tax,
        "lease base pass"
    );
    BaseComputation { pass, tax }
}

pub(crate) fn compute_final(terms: &LeaseTerms<'_>, base: &BaseComputation) -> FinalComputation {
    let input = terms.input;

    // Zero drive-off: capitalize the tax once and re-run the pass. The
    // capitalized tax is not taxed again.
    let pass = if input.zero_driveoff {
        let recapitalized = terms.pass_at(base.pass.net_cap_cost + base.tax);
        tracing::debug!(
            cap_addon = %base.tax,
            pre_tax_payment = %recapitalized.pre_tax_payment,
            "lease recapitalized pass"
        );
        recapitalized
    } else {
        base.pass
    };

    let monthly_payment = match (input.tax_policy.taxes_recurring_payment(), input.zero_driveoff) {
        (true, false) => pass.pre_tax_payment + base.tax,
        (true, true) => {
            pass.pre_tax_payment * (Decimal::ONE + input.sales_tax_percent / dec!(100))
        }
        (false, _) => pass.pre_tax_payment,
    };

    FinalComputation {
        pass,
        monthly_payment,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a lease using the built-in fee table.
pub fn calculate_lease(input: &LeaseInput) -> DealResult<LeaseQuote> {
    calculate_lease_with(input, &StandardFees)
}

/// Price a lease with lender fees taken from `fees`.
pub fn calculate_lease_with(input: &LeaseInput, fees: &impl FeeSchedule) -> DealResult<LeaseQuote> {
    validate_input(input)?;

    let residual = ResidualValue::resolve(
        input.msrp,
        input.residual_value,
        input.is_residual_percent,
    );
    tracing::debug!(
        absolute = %residual.absolute,
        percent = %residual.percent_of_msrp,
        "resolved residual value"
    );

    let terms = LeaseTerms {
        input,
        fees: fees.fees_for(&input.make),
        residual,
    };
    let base = compute_base(&terms);
    let final_computation = compute_final(&terms, &base);

    let drive_off_tax = input.tax_policy.drive_off_tax(
        &terms.taxable_amounts(final_computation.pass.pre_tax_payment),
        input.sales_tax_percent,
    );

    Ok(LeaseQuote {
        input: input.clone(),
        fees: terms.fees,
        residual,
        base_pass: base.pass,
        pass: final_computation.pass,
        tax: base.tax,
        monthly_payment: final_computation.monthly_payment,
        drive_off_tax,
        implied_apr: apr_from_money_factor(input.money_factor),
    })
}

/// Price a lease and wrap the rounded report in the standard output envelope.
pub fn lease_report(
    input: &LeaseInput,
    fees: &impl FeeSchedule,
) -> DealResult<ComputationOutput<LeaseReport>> {
    let start = Instant::now();
    let quote = calculate_lease_with(input, fees)?;

    let mut warnings: Vec<String> = Vec::new();
    if quote.residual.absolute > input.selling_price {
        warnings.push("Residual value exceeds selling price; depreciation is negative.".into());
    }
    if input.selling_price > input.msrp {
        warnings.push("Selling price is above MSRP.".into());
    }
    if quote.implied_apr > HIGH_APR_WARNING_THRESHOLD {
        warnings.push(format!(
            "Money factor implies an APR of {}%; check it was not entered as an APR.",
            quote.apr()
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "tax_policy": input.tax_policy.to_string(),
        "zero_driveoff": input.zero_driveoff,
        "amortization_months": input.amortization_months(),
        "apr_from_money_factor": "money_factor * 2400",
        "first_payment_due_at_signing": !input.zero_driveoff,
    });

    Ok(with_metadata(
        "Closed-end consumer vehicle lease (base payment + rent charge)",
        &assumptions,
        warnings,
        elapsed,
        quote.report(),
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &LeaseInput) -> DealResult<()> {
    let required = [
        ("MSRP", input.msrp),
        ("Selling Price", input.selling_price),
        ("Residual Value", input.residual_value),
        ("Money Factor", input.money_factor),
    ];
    for (field, value) in required {
        if value <= Decimal::ZERO {
            return Err(DealError::invalid(field, "must be greater than zero"));
        }
    }
    if input.lease_term_months == 0 {
        return Err(DealError::invalid("Lease Term", "must be at least one month"));
    }
    if input.amortization_months() == 0 {
        return Err(DealError::invalid(
            "Lease Term",
            "a zero drive-off lease needs at least two months",
        ));
    }
    Ok(())
}

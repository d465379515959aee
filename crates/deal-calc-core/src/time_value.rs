use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::DealError;
use crate::types::{Money, Percent, Rate};
use crate::DealResult;

/// Conversion constant between a lease money factor and its APR equivalent.
pub const MONEY_FACTOR_APR_MULTIPLIER: Decimal = dec!(2400);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// APR (in percent) implied by a lease money factor.
pub fn apr_from_money_factor(money_factor: Rate) -> Percent {
    money_factor * MONEY_FACTOR_APR_MULTIPLIER
}

/// Money factor quoted for a given APR (in percent).
pub fn money_factor_from_apr(apr: Percent) -> Rate {
    apr / MONEY_FACTOR_APR_MULTIPLIER
}

/// Monthly periodic rate for an APR quoted in percent.
pub fn monthly_rate(apr: Percent) -> Rate {
    apr / HUNDRED / MONTHS_PER_YEAR
}

/// Level payment that amortizes `principal` over `nper` periods at `rate` per period.
///
/// Payments are returned as positive amounts, unlike the spreadsheet `PMT`
/// convention.
pub fn annuity_payment(rate: Rate, nper: u32, principal: Money) -> DealResult<Money> {
    if nper == 0 {
        return Err(DealError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    // Written against the discount factor so a large growth factor shrinks
    // the divisor instead of scaling the principal.
    let amortizing = principal.checked_mul(rate).ok_or_else(|| DealError::InvalidInput {
        field: "principal".into(),
        reason: "principal times rate overflows".into(),
    })?;
    let discount = match (Decimal::ONE + rate).checked_powu(u64::from(nper)) {
        Some(growth) => Decimal::ONE / growth,
        // Past Decimal::MAX the discount factor is below the smallest representable step.
        None => Decimal::ZERO,
    };
    let denominator = Decimal::ONE - discount;

    if denominator.is_zero() {
        return Err(DealError::DivisionByZero {
            context: "annuity discount factor".into(),
        });
    }

    Ok(amortizing / denominator)
}

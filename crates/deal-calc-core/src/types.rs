use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages as quoted on a deal sheet (7.25 = 7.25%).
pub type Percent = Decimal;

/// Periodic rates expressed as decimals (a money factor of 0.00125, a monthly rate of 0.004).
pub type Rate = Decimal;

/// Round a currency amount to cents. Only applied at the reporting boundary.
pub fn round_cents(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

/// Round to the nearest whole number.
pub fn round_whole(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// Midpoints round toward positive infinity, so -2.345 becomes -2.34.
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    if value.is_sign_negative() {
        -(-value).round_dp_with_strategy(dp, RoundingStrategy::MidpointTowardZero)
    } else {
        value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

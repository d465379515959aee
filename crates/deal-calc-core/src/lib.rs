//! Vehicle lease and finance deal calculations.
//!
//! Every amount is a [`rust_decimal::Decimal`]. Calculations are pure: each
//! returns an immutable quote whose accessors round at the reporting
//! boundary.

pub mod error;
pub mod fees;
pub mod tax;
pub mod time_value;
pub mod types;

#[cfg(feature = "lease")]
pub mod lease;

#[cfg(feature = "finance")]
pub mod finance;

pub mod desk;

pub use desk::DealDesk;
pub use error::DealError;
pub use types::*;

/// Standard result type for all deal calculations
pub type DealResult<T> = Result<T, DealError>;

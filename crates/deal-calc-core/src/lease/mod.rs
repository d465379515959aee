//! Closed-end vehicle lease pricing.

pub mod pricing;
pub mod quote;
pub mod residual;

pub use pricing::{calculate_lease, calculate_lease_with, lease_report, LeaseInput, PaymentPass};
pub use quote::{DriveOffItem, DriveOffItemKind, LeaseQuote, LeaseReport};
pub use residual::ResidualValue;

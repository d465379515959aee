//! Installment loan (retail finance) pricing.

pub mod loan;

pub use loan::{calculate_finance, finance_report, FinanceInput, FinanceQuote, FinanceReport};

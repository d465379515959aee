//! A pricing session that remembers the last successful quotes.
//!
//! Quotes are plain values and can be held directly; the desk is for callers
//! that price a deal and query it later from elsewhere, such as a form that
//! recalculates on every edit. A failed calculation leaves the previous quote
//! in place.

use crate::error::DealError;
use crate::fees::{FeeSchedule, StandardFees};
use crate::DealResult;

#[cfg(feature = "finance")]
use crate::finance::{calculate_finance, FinanceInput, FinanceQuote};
#[cfg(feature = "lease")]
use crate::lease::{calculate_lease_with, LeaseInput, LeaseQuote};

#[derive(Debug, Clone, Default)]
pub struct DealDesk<F: FeeSchedule = StandardFees> {
    fees: F,
    #[cfg(feature = "lease")]
    lease: Option<LeaseQuote>,
    #[cfg(feature = "finance")]
    finance: Option<FinanceQuote>,
}

impl DealDesk<StandardFees> {
    pub fn new() -> Self {
        Self::with_fees(StandardFees)
    }
}

impl<F: FeeSchedule> DealDesk<F> {
    pub fn with_fees(fees: F) -> Self {
        DealDesk {
            fees,
            #[cfg(feature = "lease")]
            lease: None,
            #[cfg(feature = "finance")]
            finance: None,
        }
    }

    pub fn fees(&self) -> &F {
        &self.fees
    }

    #[cfg(feature = "lease")]
    pub fn price_lease(&mut self, input: &LeaseInput) -> DealResult<&LeaseQuote> {
        let quote = calculate_lease_with(input, &self.fees)?;
        Ok(&*self.lease.insert(quote))
    }

    #[cfg(feature = "lease")]
    pub fn lease(&self) -> DealResult<&LeaseQuote> {
        self.lease.as_ref().ok_or_else(|| DealError::Uncalculated {
            query: "lease".into(),
        })
    }

    #[cfg(feature = "finance")]
    pub fn price_finance(&mut self, input: &FinanceInput) -> DealResult<&FinanceQuote> {
        let quote = calculate_finance(input)?;
        Ok(&*self.finance.insert(quote))
    }

    #[cfg(feature = "finance")]
    pub fn finance(&self) -> DealResult<&FinanceQuote> {
        self.finance.as_ref().ok_or_else(|| DealError::Uncalculated {
            query: "finance".into(),
        })
    }
}

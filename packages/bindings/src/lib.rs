use deal_calc_core::fees::{FeeSchedule, FeeTable, StandardFees};
use deal_calc_core::finance::{self, FinanceInput};
use deal_calc_core::lease::{self, LeaseInput};
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Lease
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_lease(input_json: String) -> NapiResult<String> {
    let input: LeaseInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lease::lease_report(&input, &StandardFees).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Lease quote priced against a caller-supplied fee schedule (`{"makes": [...]}`).
#[napi]
pub fn calculate_lease_with_fees(input_json: String, fees_json: String) -> NapiResult<String> {
    let input: LeaseInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let fees = FeeTable::from_json(&fees_json).map_err(to_napi_error)?;
    let output = lease::lease_report(&input, &fees).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lease_fees(make: String) -> NapiResult<String> {
    let fees = StandardFees.fees_for(&make);
    serde_json::to_string(&fees).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_finance(input_json: String) -> NapiResult<String> {
    let input: FinanceInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finance::finance_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

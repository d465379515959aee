use clap::Args;
use serde_json::Value;

use deal_calc_core::fees::{FeeSchedule, FeeTable};

use crate::input;

/// Arguments for the fee lookup
#[derive(Args)]
pub struct FeesArgs {
    /// Make to look up; prints the whole schedule when omitted
    #[arg(long)]
    pub make: Option<String>,
}

/// Fee schedule from `path`, or the built-in table.
pub fn load_schedule(path: Option<&str>) -> Result<FeeTable, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let table: FeeTable = input::file::read_input(path)?;
            tracing::debug!(path, makes = table.makes.len(), "loaded fee schedule");
            Ok(table)
        }
        None => Ok(FeeTable::standard()),
    }
}

pub fn run_fees(args: FeesArgs, schedule: &FeeTable) -> Result<Value, Box<dyn std::error::Error>> {
    match args.make {
        Some(make) => {
            let fees = schedule.fees_for(&make);
            Ok(serde_json::json!({
                "make": make,
                "acquisition_fee": fees.acquisition_fee,
                "disposition_fee": fees.disposition_fee,
            }))
        }
        None => Ok(serde_json::to_value(&schedule.makes)?),
    }
}

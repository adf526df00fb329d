//! Implementation of the `certfill fee` command.

use std::path::PathBuf;

use certfill::config::load_fee_schedule;
use certfill::fees::{days_elapsed, EventType};
use certfill::format_fee;
use miette::{miette, IntoDiagnostic};
use serde::Serialize;

use super::{now_ms, EventArg};
use crate::output::load_report;
use crate::output::table::{format_assessment_table, format_tier_table};

/// Arguments for the fee command.
#[derive(Debug, clap::Args)]
pub struct FeeArgs {
    /// Fee schedule (JSON)
    #[arg(long)]
    pub fees: PathBuf,

    /// Event type
    #[arg(long, value_enum)]
    pub event: EventArg,

    /// Event date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub event_date: String,

    /// Assessment time in epoch milliseconds (defaults to now)
    #[arg(long)]
    pub now_ms: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for fee assessments.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeeJson {
    event: EventType,
    days_elapsed: i64,
    amount: String,
    tier_message_key: String,
}

/// Run the fee command.
pub fn run_fee(args: FeeArgs) -> miette::Result<i32> {
    let schedule = load_fee_schedule(&args.fees).map_err(|e| load_report(&e))?;
    let event = EventType::from(args.event);
    let now = now_ms(args.now_ms);

    let days = days_elapsed(&args.event_date, now).map_err(|e| miette!("{e}"))?;
    let result = schedule.lookup_tier(event, days);

    if args.json {
        let output = FeeJson {
            event,
            days_elapsed: days,
            amount: format_fee(result.amount),
            tier_message_key: result.tier_message_key.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", format_tier_table(&schedule, event));
        println!("{}", format_assessment_table(days, &result));
    }

    Ok(exitcode::OK)
}

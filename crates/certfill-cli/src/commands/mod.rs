//! CLI command implementations.

mod check;
mod fee;
mod render;

pub use check::{run_check, CheckArgs};
pub use fee::{run_fee, FeeArgs};
pub use render::{run_render, RenderArgs};

use certfill::fees::EventType;
use chrono::Utc;
use clap::ValueEnum;

/// Event type choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventArg {
    Birth,
    Death,
}

impl From<EventArg> for EventType {
    fn from(event: EventArg) -> Self {
        match event {
            EventArg::Birth => EventType::Birth,
            EventArg::Death => EventType::Death,
        }
    }
}

/// The assessment clock: `--now-ms` when given, else the system time.
fn now_ms(explicit: Option<i64>) -> i64 {
    explicit.unwrap_or_else(|| Utc::now().timestamp_millis())
}

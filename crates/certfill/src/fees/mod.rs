//! Certificate printing fees.
//!
//! Fees depend on how many whole days have passed since the event. Each event
//! type has an ordered table of [`PriceRange`]s covering `[0, ∞)`; the first
//! range containing the day count sets the amount, and a separately configured
//! upper bound decides which tier message the operator sees.

mod schedule;
mod tier;

pub use schedule::{
    EventFees, EventType, FeeSchedule, FeeScheduleConfig, FeeTiers, PriceRange, validate_ranges,
};
pub use tier::{
    FeeTierResult, TierMessageKey, days_elapsed, format_fee, is_free_of_cost, lookup_tier,
};

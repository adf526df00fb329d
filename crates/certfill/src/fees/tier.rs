//! Tier lookup over a price table.

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::fees::schedule::PriceRange;
use crate::format::parse_date;
use crate::types::FieldMap;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Message shown to the operator for a fee tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TierMessageKey {
    WithinFreePeriod,
    WithinChargeRange,
    BeyondChargeRange,
}

impl TierMessageKey {
    /// The key as it appears in message catalogs.
    pub fn as_str(self) -> &'static str {
        match self {
            TierMessageKey::WithinFreePeriod => "withinFreePeriod",
            TierMessageKey::WithinChargeRange => "withinChargeRange",
            TierMessageKey::BeyondChargeRange => "beyondChargeRange",
        }
    }
}

impl Display for TierMessageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// The fee for one event and the message describing its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTierResult {
    pub amount: f64,
    pub tier_message_key: TierMessageKey,
}

impl FeeTierResult {
    /// Whether no fee is due.
    pub fn is_free(&self) -> bool {
        self.amount == 0.0
    }

    /// Field map entries for a certificate: the formatted amount and the
    /// message key.
    pub fn to_fields(&self, amount_field: &str, message_field: &str) -> FieldMap {
        FieldMap::new()
            .with(amount_field, format_fee(self.amount))
            .with(message_field, self.tier_message_key.as_str())
    }
}

/// Whole days from the event date to `now_ms` (epoch milliseconds).
///
/// The event date counts from midnight UTC. Partial days round down, so the
/// result is negative for an event dated after `now_ms`.
///
/// # Errors
///
/// Returns a [`FormatError`] when `event_date` is not a date or when `now_ms`
/// is so far from it that the difference overflows.
///
/// # Example
///
/// ```
/// use certfill::fees::days_elapsed;
///
/// // 2024-03-21T12:00:00Z
/// let now = 1_711_022_400_000;
/// assert_eq!(days_elapsed("2024-03-21", now).unwrap(), 0);
/// assert_eq!(days_elapsed("2024-03-01", now).unwrap(), 20);
/// ```
pub fn days_elapsed(event_date: &str, now_ms: i64) -> Result<i64, FormatError> {
    let event_ms = parse_date(event_date)?
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis();
    let elapsed = now_ms
        .checked_sub(event_ms)
        .ok_or_else(|| FormatError::ClockOutOfRange {
            value: event_date.to_string(),
            now_ms,
        })?;
    Ok(elapsed.div_euclid(MILLIS_PER_DAY))
}

/// Find the fee for `days` in `ranges`.
///
/// The first range with `start <= days` and `days <= end` (or no end) wins.
/// When none matches, which a validated table never allows for non-negative
/// days, the first range's value is used.
pub fn lookup_tier(days: i64, ranges: &[PriceRange], charge_upper_bound: u32) -> FeeTierResult {
    let amount = ranges
        .iter()
        .find(|range| range.contains(days))
        .or_else(|| ranges.first())
        .map_or(0.0, |range| range.value);

    let tier_message_key = if amount == 0.0 {
        TierMessageKey::WithinFreePeriod
    } else if days <= i64::from(charge_upper_bound) {
        TierMessageKey::WithinChargeRange
    } else {
        TierMessageKey::BeyondChargeRange
    };

    FeeTierResult {
        amount,
        tier_message_key,
    }
}

/// Whether `days` falls in a free tier of `ranges`.
pub fn is_free_of_cost(days: i64, ranges: &[PriceRange]) -> bool {
    lookup_tier(days, ranges, 0).is_free()
}

/// Render a fee with exactly two decimals, independent of locale.
///
/// ```
/// use certfill::fees::format_fee;
///
/// assert_eq!(format_fee(5.0), "5.00");
/// assert_eq!(format_fee(12.5), "12.50");
/// ```
pub fn format_fee(value: f64) -> String {
    format!("{value:.2}")
}

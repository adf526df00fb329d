//! Per-event price tables and their validation.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, FormatError};
use crate::fees::tier::{FeeTierResult, days_elapsed, lookup_tier};

/// The kind of vital event a certificate is printed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Birth,
    Death,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Birth => "birth",
            EventType::Death => "death",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A bracket of days with one fee. `end` is inclusive; `None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub start: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    pub value: f64,
}

impl PriceRange {
    /// A closed range `[start, end]`.
    pub fn closed(start: u32, end: u32, value: f64) -> Self {
        Self {
            start,
            end: Some(end),
            value,
        }
    }

    /// An open range `[start, ∞)`.
    pub fn open(start: u32, value: f64) -> Self {
        Self {
            start,
            end: None,
            value,
        }
    }

    /// Whether `days` falls inside this range.
    pub fn contains(&self, days: i64) -> bool {
        days >= i64::from(self.start) && self.end.is_none_or(|end| days <= i64::from(end))
    }
}

/// The four-parameter form of a price table: free, low charge, high charge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTiers {
    /// Last day that is free of charge.
    pub free_period: u32,
    /// Last day charged at the lowest rate.
    pub charge_up_limit: u32,
    pub lowest_charge: f64,
    pub highest_charge: f64,
}

impl FeeTiers {
    /// Expand into `[0, free]`, `[free + 1, limit]` and `[limit + 1, ∞)`.
    ///
    /// A bound of `u32::MAX` saturates; [`validate_ranges`] rejects the result.
    pub fn to_ranges(&self) -> Vec<PriceRange> {
        vec![
            PriceRange::closed(0, self.free_period, 0.0),
            PriceRange::closed(
                self.free_period.saturating_add(1),
                self.charge_up_limit,
                self.lowest_charge,
            ),
            PriceRange::open(self.charge_up_limit.saturating_add(1), self.highest_charge),
        ]
    }
}

/// How one event's fees are configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventFees {
    Ranges { ranges: Vec<PriceRange> },
    Tiers(FeeTiers),
}

impl EventFees {
    pub fn to_ranges(&self) -> Vec<PriceRange> {
        match self {
            EventFees::Ranges { ranges } => ranges.clone(),
            EventFees::Tiers(tiers) => tiers.to_ranges(),
        }
    }
}

/// A fee schedule as written in configuration, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleConfig {
    /// Last day that still shows the "within charge range" message.
    pub charge_upper_bound: u32,
    pub birth: EventFees,
    pub death: EventFees,
}

impl FeeScheduleConfig {
    /// Expand and validate both event tables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when either table does not partition
    /// `[0, ∞)`.
    pub fn validate(&self) -> Result<FeeSchedule, ConfigurationError> {
        FeeSchedule::new(
            self.charge_upper_bound,
            self.birth.to_ranges(),
            self.death.to_ranges(),
        )
    }
}

/// Validated price tables for every event type.
///
/// Deserializing a schedule validates it, so a loaded schedule always
/// partitions `[0, ∞)` for both events.
///
/// # Example
///
/// ```
/// use certfill::fees::{EventType, FeeSchedule, FeeTiers, TierMessageKey};
///
/// let tiers = FeeTiers {
///     free_period: 45,
///     charge_up_limit: 365,
///     lowest_charge: 5.0,
///     highest_charge: 20.0,
/// };
/// let schedule = FeeSchedule::from_tiers(365, tiers, tiers).unwrap();
///
/// let result = schedule.lookup_tier(EventType::Birth, 46);
/// assert_eq!(result.amount, 5.0);
/// assert_eq!(result.tier_message_key, TierMessageKey::WithinChargeRange);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "FeeScheduleConfig")]
pub struct FeeSchedule {
    charge_upper_bound: u32,
    birth: Vec<PriceRange>,
    death: Vec<PriceRange>,
}

impl TryFrom<FeeScheduleConfig> for FeeSchedule {
    type Error = ConfigurationError;

    fn try_from(config: FeeScheduleConfig) -> Result<Self, Self::Error> {
        config.validate()
    }
}

impl FeeSchedule {
    /// Build a schedule from explicit range tables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when either table does not partition
    /// `[0, ∞)`.
    pub fn new(
        charge_upper_bound: u32,
        birth: Vec<PriceRange>,
        death: Vec<PriceRange>,
    ) -> Result<Self, ConfigurationError> {
        validate_ranges(EventType::Birth, &birth)?;
        validate_ranges(EventType::Death, &death)?;
        Ok(Self {
            charge_upper_bound,
            birth,
            death,
        })
    }

    /// Build a schedule from the four-parameter form.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when `charge_up_limit` does not exceed
    /// `free_period`, when either is `u32::MAX`, or when a charge is negative
    /// or non-finite.
    pub fn from_tiers(
        charge_upper_bound: u32,
        birth: FeeTiers,
        death: FeeTiers,
    ) -> Result<Self, ConfigurationError> {
        Self::new(charge_upper_bound, birth.to_ranges(), death.to_ranges())
    }

    pub fn charge_upper_bound(&self) -> u32 {
        self.charge_upper_bound
    }

    /// The price table for `event`.
    pub fn ranges(&self, event: EventType) -> &[PriceRange] {
        match event {
            EventType::Birth => &self.birth,
            EventType::Death => &self.death,
        }
    }

    /// Fee and tier message for `days` since an `event`.
    pub fn lookup_tier(&self, event: EventType, days: i64) -> FeeTierResult {
        lookup_tier(days, self.ranges(event), self.charge_upper_bound)
    }

    /// Whether no fee is due `days` after an `event`.
    pub fn is_free_of_cost(&self, event: EventType, days: i64) -> bool {
        self.lookup_tier(event, days).is_free()
    }

    /// Fee for an event on `event_date`, assessed at `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when `event_date` is not a date.
    #[tracing::instrument(level = "debug", skip_all, fields(%event, now_ms), ret)]
    pub fn assess(
        &self,
        event: EventType,
        event_date: &str,
        now_ms: i64,
    ) -> Result<FeeTierResult, FormatError> {
        let days = days_elapsed(event_date, now_ms)?;
        Ok(self.lookup_tier(event, days))
    }
}

/// Check that `ranges` partition `[0, ∞)`: the first starts at zero, each
/// next one starts the day after the previous ends, and only the last is open.
/// Every fee must be finite and not negative.
pub fn validate_ranges(
    event: EventType,
    ranges: &[PriceRange],
) -> Result<(), ConfigurationError> {
    let name = || event.to_string();
    let first = ranges
        .first()
        .ok_or_else(|| ConfigurationError::EmptyPriceTable { event: name() })?;
    if first.start != 0 {
        return Err(ConfigurationError::PriceTableStart {
            event: name(),
            start: first.start,
        });
    }

    let mut expected = 0;
    for (index, range) in ranges.iter().enumerate() {
        if range.start != expected {
            return Err(ConfigurationError::PriceRangeGap {
                event: name(),
                index,
                expected,
                found: range.start,
            });
        }
        if !range.value.is_finite() || range.value.is_sign_negative() {
            return Err(ConfigurationError::InvalidPrice {
                event: name(),
                index,
                value: range.value.to_string(),
            });
        }
        let Some(end) = range.end else {
            if index + 1 != ranges.len() {
                return Err(ConfigurationError::OpenRangeNotLast {
                    event: name(),
                    index,
                });
            }
            return Ok(());
        };
        if end < range.start {
            return Err(ConfigurationError::InvertedPriceRange {
                event: name(),
                index,
                start: range.start,
                end,
            });
        }
        expected = match end.checked_add(1) {
            Some(next) => next,
            None if index + 1 == ranges.len() => break,
            None => {
                return Err(ConfigurationError::PriceRangeOverflow {
                    event: name(),
                    index,
                    end,
                });
            }
        };
    }

    Err(ConfigurationError::MissingOpenRange { event: name() })
}

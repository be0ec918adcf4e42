//! Gold purity grades, rate figures, and release-timestamp rules.
//!
//! A snapshot carries a selling rate, an exchange rate, and making charges
//! for each of the three purities, all keyed by a single release timestamp.
//! The pure rules here (timestamp parsing, the history window, the
//! latest-non-future selection) are what the repositories and handlers
//! build their queries around.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Wire format for release and audit timestamps.
pub const RELEASE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Gold fineness grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purity {
    /// 24 karat (pure gold).
    K24,
    /// 22 karat.
    K22,
    /// 18 karat.
    K18,
}

impl Purity {
    /// All purities, in display order.
    pub const ALL: [Self; 3] = [Self::K24, Self::K22, Self::K18];

    /// The wire label (`24K`, `22K`, `18K`).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::K24 => "24K",
            Self::K22 => "22K",
            Self::K18 => "18K",
        }
    }

    /// The key used by the simplified current-rates payload.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::K24 => "24k_gold",
            Self::K22 => "22k_gold",
            Self::K18 => "18k_gold",
        }
    }
}

impl std::fmt::Display for Purity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown purity label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid purity: {0}")]
pub struct ParsePurityError(String);

impl FromStr for Purity {
    type Err = ParsePurityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24K" => Ok(Self::K24),
            "22K" => Ok(Self::K22),
            "18K" => Ok(Self::K18),
            other => Err(ParsePurityError(other.to_string())),
        }
    }
}

/// The three figures tracked per purity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateTriple {
    /// Selling price per gram.
    pub selling: Decimal,
    /// Exchange price per gram.
    pub exchange: Decimal,
    /// Making charges per gram.
    pub making: Decimal,
}

/// One snapshot's figures for all three purities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSheet {
    /// 24K figures.
    pub k24: RateTriple,
    /// 22K figures.
    pub k22: RateTriple,
    /// 18K figures.
    pub k18: RateTriple,
}

impl RateSheet {
    /// Returns the figures for one purity.
    #[must_use]
    pub const fn triple(&self, purity: Purity) -> RateTriple {
        match purity {
            Purity::K24 => self.k24,
            Purity::K22 => self.k22,
            Purity::K18 => self.k18,
        }
    }
}

/// Error returned when a release timestamp cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid release datetime: {0}")]
pub struct ParseReleaseError(String);

/// Parses a release timestamp from admin input.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]` with either a space or a `T` between
/// date and time (the shape produced by `datetime-local` form inputs).
///
/// # Errors
///
/// Returns `ParseReleaseError` for anything else.
pub fn parse_release_datetime(raw: &str) -> Result<NaiveDateTime, ParseReleaseError> {
    let normalized = raw.trim().replace('T', " ");

    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M"))
        .map_err(|_| ParseReleaseError(raw.to_string()))
}

/// Formats a release or audit timestamp for the wire.
#[must_use]
pub fn format_release_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(RELEASE_DATETIME_FORMAT).to_string()
}

/// Computes the history window for a day count.
///
/// The window runs from `days - 1` days before `now`, truncated to
/// midnight, up to `now` itself, so a 1-day window covers today only.
#[must_use]
pub fn history_window(now: NaiveDateTime, days: u32) -> (NaiveDateTime, NaiveDateTime) {
    let start_date = now.date() - Duration::days(i64::from(days) - 1);
    (start_date.and_time(NaiveTime::MIN), now)
}

/// Selects the most recent release timestamp that is not in the future.
///
/// This is the rule behind the `latest`/`current` endpoints: snapshots
/// dated after `now` stay invisible until their release time arrives.
#[must_use]
pub fn latest_release_at_or_before(
    releases: &[NaiveDateTime],
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    releases.iter().copied().filter(|release| *release <= now).max()
}

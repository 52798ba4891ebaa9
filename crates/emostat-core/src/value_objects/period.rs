//! Period bucketing - the five rolling aggregation windows
//!
//! Every counter mutation lands in five buckets at once: all-time,
//! this-year, this-month, this-week-of-month, and this-day. All buckets
//! are computed from UTC "now" at the moment of the mutating event;
//! historical events are never reclassified.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One aggregation window, identified by a stable storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// All-time counter, key `total`
    Total,
    /// Calendar year, key `Y2024`
    Year(i32),
    /// Calendar month, key `YM202403` (year * 100 + month)
    Month(u32),
    /// Week of month, key `YMW2024031` (1-based week)
    Week { year: i32, month: u32, week: u32 },
    /// Calendar day, key `YMD20240301`
    Day { year: i32, month: u32, day: u32 },
}

impl Period {
    /// Stable storage key for this period, used as part of counter keys
    pub fn key(&self) -> String {
        match self {
            Self::Total => "total".to_string(),
            Self::Year(year) => format!("Y{year:04}"),
            Self::Month(ym) => format!("YM{ym:06}"),
            Self::Week { year, month, week } => format!("YMW{year:04}{month:02}{week}"),
            Self::Day { year, month, day } => format!("YMD{year:04}{month:02}{day:02}"),
        }
    }

    /// Map a human period token to the matching window at `now`.
    ///
    /// Recognized tokens: `year|y|annual`, `month|m`, `week|w`,
    /// `day|today|d`. Anything else falls back to the all-time window.
    pub fn from_token(token: &str, now: DateTime<Utc>) -> Self {
        let periods = Periods::at(now);
        match token.to_ascii_lowercase().as_str() {
            "year" | "y" | "annual" => periods.year,
            "month" | "m" => periods.month,
            "week" | "w" => periods.week,
            "day" | "today" | "d" => periods.day,
            _ => Period::Total,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The five bucket keys in effect at one moment in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periods {
    pub total: Period,
    pub year: Period,
    pub month: Period,
    pub week: Period,
    pub day: Period,
}

impl Periods {
    /// Compute all five bucket keys for the given UTC instant.
    ///
    /// Pure function of `now`; the increment and decrement paths both go
    /// through here so a given occurrence is classified symmetrically.
    pub fn at(now: DateTime<Utc>) -> Self {
        let year = now.year();
        let month = now.month();
        let day = now.day();

        Self {
            total: Period::Total,
            year: Period::Year(year),
            month: Period::Month(year as u32 * 100 + month),
            week: Period::Week {
                year,
                month,
                week: week_of_month(year, month, day),
            },
            day: Period::Day { year, month, day },
        }
    }

    /// Bucket keys for the current instant
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// All five windows, total first
    pub fn all(&self) -> [Period; 5] {
        [self.total, self.year, self.month, self.week, self.day]
    }
}

/// 1-based week of month: `ceil((day + weekday_of_first) / 7)` where
/// `weekday_of_first` is the 0-based weekday (Monday = 0) of the first
/// day of the month.
fn week_of_month(year: i32, month: u32, day: u32) -> u32 {
    let weekday_of_first = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_monday())
        .unwrap_or(0);
    (day + weekday_of_first).div_ceil(7)
}

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

const SECONDS_PER_MEAN_YEAR: f64 = 365.2425 * 86_400.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Returns unix seconds for January 1st 00:00 UTC of `year`.
///
/// Years outside chrono's calendar range fall back to a mean-year estimate.
#[must_use]
pub fn year_to_time(year: i32) -> f64 {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| datetime_to_unix_seconds(naive.and_utc()))
        .unwrap_or_else(|| f64::from(year - 1970) * SECONDS_PER_MEAN_YEAR)
}

/// Maps unix seconds to a fractional calendar year (`2020.5` is mid-2020).
#[must_use]
pub fn time_to_year_fraction(time: f64) -> Option<f64> {
    if !time.is_finite() {
        return None;
    }
    let seconds = time.floor();
    let nanos = ((time - seconds) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    let year = match DateTime::from_timestamp(seconds as i64, nanos) {
        Some(datetime) => datetime.year(),
        None => return Some(1970.0 + time / SECONDS_PER_MEAN_YEAR),
    };
    let start = year_to_time(year);
    let end = year_to_time(year + 1);
    Some(f64::from(year) + (time - start) / (end - start))
}

/// Returns the calendar year whose January 1st is closest to `time`.
#[must_use]
pub fn nearest_year(time: f64) -> Option<i32> {
    time_to_year_fraction(time).map(|fraction| fraction.round() as i32)
}

/// Returns the calendar year containing `time`.
#[must_use]
pub fn year_of_time(time: f64) -> Option<i32> {
    time_to_year_fraction(time).map(|fraction| fraction.floor() as i32)
}

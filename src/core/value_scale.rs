use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::format::format_si;
use crate::core::scale::{LinearScale, nice_tick_step, nice_ticks};
use crate::error::ChartResult;

/// Target count passed to the natural tick generator.
pub const NATURAL_TICK_TARGET: usize = 5;

const MAX_EXTENDED_TICKS: usize = 1_000;
const MIN_SPAN_RELATIVE: f64 = 0.05;
const MIN_SPAN_ZERO_HALF: f64 = 0.5;

/// One tick on the value axis. Major ticks come from the natural tick set
/// and carry a label; minor ticks are synthesized extensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTick {
    pub value: f64,
    pub major: bool,
    pub label: Option<String>,
}

impl ValueTick {
    /// Scene key for this tick: the value rounded to the decimal resolution
    /// of `step`, so float noise in synthesized ticks maps to one key.
    #[must_use]
    pub fn key(&self, step: f64) -> String {
        if !step.is_finite() || step <= 0.0 {
            return format!("{}", self.value);
        }
        let decimals = (-(step.log10() + 1e-6).floor()).max(0.0) as usize;
        let resolution = 10f64.powi(-(decimals as i32));
        let rounded = (self.value / resolution).round() * resolution + 0.0;
        format!("{rounded:.decimals$}")
    }
}

/// Step between adjacent ticks of a synthesized set, `0.0` below two ticks.
#[must_use]
pub fn tick_step(ticks: &[ValueTick]) -> f64 {
    match ticks {
        [first, second, ..] => second.value - first.value,
        _ => 0.0,
    }
}

/// Vertical value scale mapped onto an inverted pixel axis
/// (`range_bottom` at the domain minimum, `range_top` at the maximum).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    pub fn new(
        domain_min: f64,
        domain_max: f64,
        range_bottom: f64,
        range_top: f64,
    ) -> ChartResult<Self> {
        let (domain_min, domain_max) = visible_value_domain(domain_min, domain_max);
        Ok(Self {
            linear: LinearScale::new(domain_min, domain_max, range_bottom, range_top)?,
        })
    }

    /// Fits the domain to `[min, max]` over `values`, widening degenerate or
    /// empty inputs to a minimum visible span.
    pub fn from_values(
        values: impl IntoIterator<Item = (f64, f64)>,
        range_bottom: f64,
        range_top: f64,
    ) -> ChartResult<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|(low, high)| low.is_finite() && high.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (low, high)| {
                (min.min(low), max.max(high))
            });
        Self::new(min, max, range_bottom, range_top)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        self.linear.map(value)
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Natural ticks of the current domain.
    #[must_use]
    pub fn natural_ticks(self) -> Vec<f64> {
        self.linear.ticks(NATURAL_TICK_TARGET)
    }

    /// Evenly spaced tick set reaching past both domain ends.
    ///
    /// See [`extended_ticks`].
    #[must_use]
    pub fn extended_ticks(self, subdivisions: usize) -> Vec<ValueTick> {
        let (min, max) = self.domain();
        extended_ticks(min, max, subdivisions)
    }
}

/// Returns a drawable `[min, max]` domain.
///
/// Non-finite or empty inputs fall back to `[0, 1]`; `min == max` is widened
/// symmetrically by 5% of the magnitude (or 0.5 around zero).
#[must_use]
pub fn visible_value_domain(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() || min > max {
        return (0.0, 1.0);
    }
    if min == max {
        let half = if min == 0.0 {
            MIN_SPAN_ZERO_HALF
        } else {
            min.abs() * MIN_SPAN_RELATIVE
        };
        warn!(value = min, "degenerate value domain widened");
        return (min - half, max + half);
    }
    (min, max)
}

/// Synthesizes the symmetric value-axis tick set for `[min, max]`.
///
/// The natural ticks (target count 5) fix the step; the set is anchored on
/// the first natural tick and extended in both directions at that step
/// divided by `subdivisions` until one tick sits at or below `min` and one
/// at or above `max`. Natural ticks are labelled majors; every other tick
/// is an unlabelled minor.
#[must_use]
pub fn extended_ticks(min: f64, max: f64, subdivisions: usize) -> Vec<ValueTick> {
    let (min, max) = visible_value_domain(min, max);
    let natural = nice_ticks(min, max, NATURAL_TICK_TARGET);
    let natural_step = match natural.as_slice() {
        [first, second, ..] => second - first,
        _ => nice_tick_step(min, max, NATURAL_TICK_TARGET),
    };
    if !natural_step.is_finite() || natural_step <= 0.0 {
        return natural.into_iter().map(major_tick).collect();
    }

    let step = natural_step / subdivisions.max(1) as f64;
    let anchor = natural
        .first()
        .copied()
        .unwrap_or_else(|| (min / natural_step).floor() * natural_step);
    let tolerance = step * 1e-6;

    let mut low = ((min - anchor) / step + 1e-9).floor() as i64;
    if anchor + low as f64 * step > min + tolerance {
        low -= 1;
    }
    let mut high = ((max - anchor) / step - 1e-9).ceil() as i64;
    if anchor + (high as f64) * step < max - tolerance {
        high += 1;
    }
    if (high - low) as usize >= MAX_EXTENDED_TICKS {
        warn!(low, high, "value tick extension capped");
        return natural.into_iter().map(major_tick).collect();
    }

    (low..=high)
        .map(|k| {
            let raw = anchor + k as f64 * step;
            match natural
                .iter()
                .copied()
                .find(|tick| (tick - raw).abs() <= tolerance)
            {
                Some(tick) => major_tick(tick),
                None => ValueTick {
                    value: clean_zero(raw, tolerance),
                    major: false,
                    label: None,
                },
            }
        })
        .collect()
}

fn major_tick(value: f64) -> ValueTick {
    ValueTick {
        value,
        major: true,
        label: Some(format_si(value)),
    }
}

fn clean_zero(value: f64, tolerance: f64) -> f64 {
    if value.abs() <= tolerance { 0.0 } else { value }
}

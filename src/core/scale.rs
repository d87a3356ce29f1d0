use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_475; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a domain to a pixel range.
///
/// A zero-width domain maps every value to the middle of the range, so
/// single-sample windows stay drawable instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn with_domain(self, domain_start: f64, domain_end: f64) -> Self {
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    /// Maps a domain value to pixels.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = if self.is_degenerate() {
            0.5
        } else {
            (value - self.domain_start) / (self.domain_end - self.domain_start)
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps pixels back to the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Human-friendly ticks (multiples of 1, 2 or 5 times a power of ten)
    /// inside the domain, approximately `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain_start, self.domain_end, count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TickPlan {
    first: f64,
    last: f64,
    increment: f64,
}

fn tick_plan(start: f64, stop: f64, count: f64) -> TickPlan {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round();
        last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        // Negative increments encode "divide by" to keep decimal ticks exact.
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_plan(start, stop, count * 2.0);
    }
    TickPlan {
        first,
        last,
        increment,
    }
}

/// Returns evenly spaced "nice" values covering `[start, stop]`.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let plan = if reverse {
        tick_plan(stop, start, count as f64)
    } else {
        tick_plan(start, stop, count as f64)
    };
    if !(plan.last >= plan.first) || !plan.increment.is_finite() {
        return Vec::new();
    }

    let n = (plan.last - plan.first) as usize + 1;
    let value_at = |k: f64| {
        if plan.increment < 0.0 {
            k / -plan.increment
        } else {
            k * plan.increment
        }
    };
    (0..n)
        .map(|i| {
            let k = if reverse {
                plan.last - i as f64
            } else {
                plan.first + i as f64
            };
            value_at(k)
        })
        .collect()
}

/// Positive distance between adjacent `nice_ticks` for the same inputs.
#[must_use]
pub fn nice_tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return 0.0;
    }
    let (lo, hi) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let increment = tick_plan(lo, hi, count as f64).increment;
    if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, nice_tick_step, nice_ticks};

    #[test]
    fn nice_ticks_match_expected_decimal_steps() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(3.0, 17.0, 5), vec![4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(nice_ticks(-2.5, 2.5, 5), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn reversed_domain_yields_descending_ticks() {
        assert_eq!(nice_ticks(10.0, 0.0, 5), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn tick_step_is_positive() {
        assert_eq!(nice_tick_step(0.0, 10.0, 5), 2.0);
        assert_eq!(nice_tick_step(1.0, 0.0, 5), 0.2);
        assert_eq!(nice_tick_step(1.0, 1.0, 5), 0.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let scale = LinearScale::new(5.0, 5.0, 0.0, 100.0).expect("scale");
        assert!(scale.is_degenerate());
        assert!(!scale.with_domain(5.0, 6.0).is_degenerate());
        assert_eq!(scale.map(5.0), 50.0);
        assert_eq!(scale.invert(80.0), 5.0);
    }

    #[test]
    fn inverted_pixel_range_round_trips() {
        let scale = LinearScale::new(0.0, 50.0, 400.0, 0.0).expect("scale");
        assert_eq!(scale.map(0.0), 400.0);
        assert_eq!(scale.map(50.0), 0.0);
        assert!((scale.invert(scale.map(12.5)) - 12.5).abs() <= 1e-9);
    }
}

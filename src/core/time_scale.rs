use serde::{Deserialize, Serialize};

use crate::core::primitives::{nearest_year, year_to_time};
use crate::core::scale::LinearScale;
use crate::core::windowing::ViewWindow;
use crate::error::{ChartError, ChartResult};

/// Years divisible by this value are labelled on the time axis.
pub const MAJOR_YEAR_INTERVAL: i32 = 10;

/// One yearly tick on the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTick {
    pub year: i32,
    pub major: bool,
    pub label: Option<String>,
}

/// Time axis model: a view window of whole years mapped onto a horizontal
/// pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
    min_year: i32,
    max_year: i32,
}

impl TimeScale {
    pub fn new(
        min_year: i32,
        max_year: i32,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if min_year > max_year {
            return Err(ChartError::InvalidWindow { min_year, max_year });
        }
        let linear = LinearScale::new(
            year_to_time(min_year),
            year_to_time(max_year),
            range_start,
            range_end,
        )?;
        Ok(Self {
            linear,
            min_year,
            max_year,
        })
    }

    pub fn from_window(window: ViewWindow, range_start: f64, range_end: f64) -> ChartResult<Self> {
        let (min_year, max_year) = window.bounds();
        Self::new(min_year, max_year, range_start, range_end)
    }

    #[must_use]
    pub fn years(self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn time_to_pixel(self, time: f64) -> f64 {
        self.linear.map(time)
    }

    #[must_use]
    pub fn year_to_pixel(self, year: i32) -> f64 {
        self.linear.map(year_to_time(year))
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Nearest calendar year under `pixel`, clamped into the window.
    #[must_use]
    pub fn pixel_to_year(self, pixel: f64) -> Option<i32> {
        if !pixel.is_finite() {
            return None;
        }
        nearest_year(self.pixel_to_time(pixel))
            .map(|year| year.clamp(self.min_year, self.max_year))
    }

    /// Strict containment in the pixel range, edges excluded.
    #[must_use]
    pub fn contains_pixel(self, pixel: f64) -> bool {
        let (start, end) = self.range();
        let (lo, hi) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        lo < pixel && pixel < hi
    }

    #[must_use]
    pub fn year_ticks(self) -> Vec<YearTick> {
        year_ticks(self.min_year, self.max_year)
    }
}

/// One tick per year; decades are labelled majors, other years unlabelled
/// minors.
#[must_use]
pub fn year_ticks(min_year: i32, max_year: i32) -> Vec<YearTick> {
    (min_year..=max_year)
        .map(|year| {
            let major = year.rem_euclid(MAJOR_YEAR_INTERVAL) == 0;
            YearTick {
                year,
                major,
                label: major.then(|| year.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{TimeScale, year_ticks};

    #[test]
    fn decades_are_major_ticks() {
        let ticks = year_ticks(2018, 2031);
        assert_eq!(ticks.len(), 14);
        let majors: Vec<i32> = ticks.iter().filter(|t| t.major).map(|t| t.year).collect();
        assert_eq!(majors, vec![2020, 2030]);
        assert_eq!(ticks[2].label.as_deref(), Some("2020"));
        assert!(ticks[0].label.is_none());
    }

    #[test]
    fn window_edges_map_to_range_edges() {
        let scale = TimeScale::new(2010, 2050, 30.0, 830.0).expect("scale");
        assert!((scale.year_to_pixel(2010) - 30.0).abs() <= 1e-9);
        assert!((scale.year_to_pixel(2050) - 830.0).abs() <= 1e-9);
        assert_eq!(scale.pixel_to_year(830.0), Some(2050));
        assert_eq!(scale.pixel_to_year(-500.0), Some(2010));
    }

    #[test]
    fn containment_excludes_edges() {
        let scale = TimeScale::new(2010, 2020, 30.0, 830.0).expect("scale");
        assert!(!scale.contains_pixel(30.0));
        assert!(scale.contains_pixel(31.0));
        assert!(!scale.contains_pixel(830.0));
    }

    #[test]
    fn single_year_window_is_valid() {
        let scale = TimeScale::new(2030, 2030, 0.0, 100.0).expect("scale");
        assert_eq!(scale.year_to_pixel(2030), 50.0);
        assert_eq!(scale.pixel_to_year(12.0), Some(2030));
        assert!(TimeScale::new(2031, 2030, 0.0, 100.0).is_err());
    }
}

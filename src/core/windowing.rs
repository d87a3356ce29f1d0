use serde::{Deserialize, Serialize};

use crate::core::primitives::year_to_time;
use crate::core::series::Series;
use crate::core::types::TimePoint;
use crate::error::{ChartError, ChartResult};

/// Active time gate: an inclusive year range for line/area charts or a
/// single snapshot year for treemaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewWindow {
    Range { min_year: i32, max_year: i32 },
    Year { year: i32 },
}

impl ViewWindow {
    pub fn range(min_year: i32, max_year: i32) -> ChartResult<Self> {
        if min_year > max_year {
            return Err(ChartError::InvalidWindow { min_year, max_year });
        }
        Ok(Self::Range { min_year, max_year })
    }

    #[must_use]
    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// Inclusive year bounds; a single-year window spans one year.
    #[must_use]
    pub fn bounds(self) -> (i32, i32) {
        match self {
            Self::Range { min_year, max_year } => (min_year, max_year),
            Self::Year { year } => (year, year),
        }
    }

    /// Inclusive time bounds in unix seconds.
    #[must_use]
    pub fn time_bounds(self) -> (f64, f64) {
        let (min_year, max_year) = self.bounds();
        (year_to_time(min_year), year_to_time(max_year))
    }

    /// Clamps the window into `[lo, hi]`, preserving `min <= max`.
    #[must_use]
    pub fn clamped(self, lo: i32, hi: i32) -> Self {
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        match self {
            Self::Range { min_year, max_year } => {
                let min_year = min_year.clamp(lo, hi);
                let max_year = max_year.clamp(min_year, hi);
                Self::Range { min_year, max_year }
            }
            Self::Year { year } => Self::Year {
                year: year.clamp(lo, hi),
            },
        }
    }
}

/// Returns points whose logical time falls inside an inclusive time window.
#[must_use]
pub fn points_in_time_window<P: TimePoint>(points: &[P], start: f64, end: f64) -> Vec<P> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    points
        .iter()
        .copied()
        .filter(|point| point.time() >= min_t && point.time() <= max_t)
        .collect()
}

/// Narrows every series to the samples inside `window`, keeping series order
/// and sample order. Series left without samples are kept (empty curves).
#[must_use]
pub fn series_in_window<P: TimePoint>(series: &[Series<P>], window: ViewWindow) -> Vec<Series<P>> {
    let (start, end) = window.time_bounds();
    series
        .iter()
        .map(|line| Series {
            name: line.name.clone(),
            values: points_in_time_window(&line.values, start, end),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::ViewWindow;

    #[test]
    fn inverted_range_is_rejected() {
        assert!(ViewWindow::range(2030, 2020).is_err());
        assert!(ViewWindow::range(2020, 2020).is_ok());
    }

    #[test]
    fn clamping_keeps_window_ordered() {
        let window = ViewWindow::range(2000, 2100).expect("window");
        assert_eq!(
            window.clamped(2010, 2050),
            ViewWindow::Range {
                min_year: 2010,
                max_year: 2050
            }
        );
        assert_eq!(
            ViewWindow::year(2070).clamped(2010, 2050),
            ViewWindow::Year { year: 2050 }
        );
    }
}

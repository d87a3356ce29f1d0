use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ViewWindow, nice_ticks};
use crate::error::{ChartError, ChartResult};

/// Target count of labelled slider ticks.
pub const SLIDER_TICK_TARGET: usize = 5;

/// Year-range control bound to the dataset's observed years.
///
/// Line and area charts drive a `[min, max]` range, treemaps a single
/// year. The step is one year; every accepted change is reported back as
/// the new [`ViewWindow`]. Out-of-bounds inputs are clamped, never
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlider {
    bounds: (i32, i32),
    window: ViewWindow,
}

impl TimeSlider {
    /// Range slider over `bounds`, starting at `initial` clamped into them.
    pub fn range(bounds: (i32, i32), initial: (i32, i32)) -> ChartResult<Self> {
        let window = ViewWindow::range(initial.0, initial.1)?;
        Ok(Self::bound(bounds, window))
    }

    /// Single-year slider over `bounds`.
    #[must_use]
    pub fn single(bounds: (i32, i32), year: i32) -> Self {
        Self::bound(bounds, ViewWindow::year(year))
    }

    fn bound(bounds: (i32, i32), window: ViewWindow) -> Self {
        let bounds = (bounds.0.min(bounds.1), bounds.0.max(bounds.1));
        Self {
            bounds,
            window: window.clamped(bounds.0, bounds.1),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> (i32, i32) {
        self.bounds
    }

    #[must_use]
    pub fn window(&self) -> ViewWindow {
        self.window
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self.window, ViewWindow::Year { .. })
    }

    /// Moves both range handles. Rejects `min > max`; a single-year slider
    /// takes `min_year`.
    pub fn set_range(&mut self, min_year: i32, max_year: i32) -> ChartResult<ViewWindow> {
        if min_year > max_year {
            return Err(ChartError::InvalidWindow { min_year, max_year });
        }
        let window = if self.is_single() {
            ViewWindow::year(min_year)
        } else {
            ViewWindow::Range { min_year, max_year }
        };
        self.window = window.clamped(self.bounds.0, self.bounds.1);
        debug!(window = ?self.window, "slider range changed");
        Ok(self.window)
    }

    /// Moves the single handle. A range slider collapses onto `year`.
    pub fn set_year(&mut self, year: i32) -> ViewWindow {
        let window = if self.is_single() {
            ViewWindow::year(year)
        } else {
            ViewWindow::Range {
                min_year: year,
                max_year: year,
            }
        };
        self.window = window.clamped(self.bounds.0, self.bounds.1);
        debug!(window = ?self.window, "slider year changed");
        self.window
    }

    /// Rebinds the slider to new bounds, clamping the current selection.
    pub fn rebind(&mut self, min_year: i32, max_year: i32) {
        *self = Self::bound((min_year, max_year), self.window);
    }

    /// Labelled tick years across the bounds.
    #[must_use]
    pub fn ticks(&self) -> Vec<i32> {
        let (lo, hi) = self.bounds;
        nice_ticks(f64::from(lo), f64::from(hi), SLIDER_TICK_TARGET)
            .into_iter()
            .filter(|tick| tick.fract() == 0.0)
            .map(|tick| tick as i32)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TimeSlider;
    use crate::core::ViewWindow;

    #[test]
    fn initial_window_is_clamped_into_bounds() {
        let slider = TimeSlider::range((2015, 2040), (2010, 2050)).expect("slider");
        assert_eq!(
            slider.window(),
            ViewWindow::Range {
                min_year: 2015,
                max_year: 2040
            }
        );
        let single = TimeSlider::single((2015, 2040), 2099);
        assert_eq!(single.window(), ViewWindow::Year { year: 2040 });
    }

    #[test]
    fn decade_bounds_give_round_ticks() {
        let slider = TimeSlider::single((2010, 2050), 2020);
        assert_eq!(slider.ticks(), vec![2010, 2020, 2030, 2040, 2050]);
    }
}

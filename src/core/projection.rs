use serde::{Deserialize, Serialize};

use crate::core::time_scale::TimeScale;

/// First projected year: data after it is forecast.
pub const DEFAULT_PROJECTION_YEAR: i32 = 2020;

/// Horizontal offset of the "Projection" label from the shaded region start.
pub const LABEL_OFFSET_X: f64 = 14.0;
/// Baseline of the "Projection" label from the plot top.
pub const LABEL_Y: f64 = 20.0;
pub const LABEL_TEXT: &str = "Projection";

/// Geometry of the forecast marker for one view window, in plot-local
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOverlay {
    pub first_year: i32,
    pub last_year: i32,
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub label_x: f64,
    pub label_y: f64,
    /// x of the dashed boundary guide, present when the shaded region
    /// starts exactly at the projection year.
    pub guide_x: Option<f64>,
}

/// Computes the projection overlay for the time scale's window.
///
/// The region spans `max(window_start, projection_year)..window_end` and
/// exists only when that span is positive. `plot_bottom` is the y of the
/// x-axis baseline.
#[must_use]
pub fn projection_overlay(
    time_scale: TimeScale,
    projection_year: i32,
    plot_bottom: f64,
) -> Option<ProjectionOverlay> {
    let (window_start, window_end) = time_scale.years();
    let first_year = window_start.max(projection_year);
    let last_year = window_end;
    if last_year <= first_year {
        return None;
    }

    let x = time_scale.year_to_pixel(first_year);
    let end = time_scale.year_to_pixel(last_year);
    Some(ProjectionOverlay {
        first_year,
        last_year,
        x,
        width: end - x,
        height: plot_bottom,
        label_x: x + LABEL_OFFSET_X,
        label_y: LABEL_Y,
        guide_x: (first_year == projection_year).then_some(x),
    })
}

#[cfg(test)]
mod tests {
    use super::projection_overlay;
    use crate::core::time_scale::TimeScale;

    #[test]
    fn window_before_projection_year_has_no_overlay() {
        let scale = TimeScale::new(2010, 2020, 0.0, 100.0).expect("scale");
        assert!(projection_overlay(scale, 2020, 300.0).is_none());
    }

    #[test]
    fn window_spanning_projection_year_gets_guide() {
        let scale = TimeScale::new(2010, 2050, 0.0, 400.0).expect("scale");
        let overlay = projection_overlay(scale, 2020, 300.0).expect("overlay");
        assert_eq!(overlay.first_year, 2020);
        assert!(overlay.guide_x.is_some());
        assert!((overlay.x + overlay.width - 400.0).abs() <= 1e-9);
        assert_eq!(overlay.height, 300.0);
    }
}

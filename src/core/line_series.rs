use crate::core::path::Path;
use crate::core::time_scale::TimeScale;
use crate::core::types::DataPoint;
use crate::core::value_scale::ValueScale;

/// Maps line points into plot-local pixel coordinates.
#[must_use]
pub fn project_line_points(
    points: &[DataPoint],
    time_scale: TimeScale,
    value_scale: ValueScale,
) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|point| {
            (
                time_scale.time_to_pixel(point.x),
                value_scale.value_to_pixel(point.y),
            )
        })
        .collect()
}

/// Builds the smooth line path for one series.
///
/// Empty input yields an empty path, a single point yields a degenerate
/// `M x,y Z` path.
#[must_use]
pub fn project_line_path(
    points: &[DataPoint],
    time_scale: TimeScale,
    value_scale: ValueScale,
) -> Path {
    monotone_x_path(&project_line_points(points, time_scale, value_scale))
}

/// Cubic interpolation that stays monotone in `y` between samples whose `x`
/// increases (Steffen's method). Coincident consecutive points are skipped.
#[must_use]
pub fn monotone_x_path(points: &[(f64, f64)]) -> Path {
    let mut curve = MonotoneX::default();
    for &(x, y) in points {
        curve.point(x, y);
    }
    curve.finish()
}

#[derive(Debug, Default)]
struct MonotoneX {
    path: Path,
    state: u8,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
}

impl MonotoneX {
    fn point(&mut self, x: f64, y: f64) {
        if self.state > 0 && x == self.x1 && y == self.y1 {
            return;
        }
        let mut t1 = f64::NAN;
        match self.state {
            0 => {
                self.state = 1;
                self.path.move_to(x, y);
            }
            1 => self.state = 2,
            2 => {
                self.state = 3;
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.bezier(t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.bezier(self.t0, t1);
            }
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn finish(mut self) -> Path {
        match self.state {
            1 => self.path.close(),
            2 => self.path.line_to(self.x1, self.y1),
            3 => {
                let t1 = self.slope2(self.t0);
                self.bezier(self.t0, t1);
            }
            _ => {}
        }
        self.path
    }

    /// Tangent at the current point from both neighbouring secants.
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let s0 = (self.y1 - self.y0) / signed_span(h0, h1);
        let s1 = (y2 - self.y1) / signed_span(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        if slope.is_nan() { 0.0 } else { slope }
    }

    /// One-sided tangent at the current point.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h == 0.0 {
            t
        } else {
            (3.0 * (self.y1 - self.y0) / h - t) / 2.0
        }
    }

    fn bezier(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        self.path.cubic_to(
            self.x0 + dx,
            self.y0 + dx * t0,
            self.x1 - dx,
            self.y1 - dx * t1,
            self.x1,
            self.y1,
        );
    }
}

fn signed_span(span: f64, other: f64) -> f64 {
    if span != 0.0 {
        span
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

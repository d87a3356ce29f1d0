use serde::{Deserialize, Serialize};

use crate::core::path::Path;
use crate::core::time_scale::TimeScale;
use crate::core::types::StackedPoint;
use crate::core::value_scale::ValueScale;

/// Band vertex in plot-local pixels: `top` follows `y1`, `bottom` follows
/// `y0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandVertex {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
}

#[must_use]
pub fn project_band_vertices(
    points: &[StackedPoint],
    time_scale: TimeScale,
    value_scale: ValueScale,
) -> Vec<BandVertex> {
    points
        .iter()
        .map(|point| BandVertex {
            x: time_scale.time_to_pixel(point.x),
            top: value_scale.value_to_pixel(point.y1),
            bottom: value_scale.value_to_pixel(point.y0),
        })
        .collect()
}

/// Builds the filled band between the `y0` and `y1` curves.
///
/// The outline runs forward along `y1`, back along `y0`, and closes.
#[must_use]
pub fn project_area_path(
    points: &[StackedPoint],
    time_scale: TimeScale,
    value_scale: ValueScale,
) -> Path {
    band_path(&project_band_vertices(points, time_scale, value_scale))
}

#[must_use]
pub fn band_path(vertices: &[BandVertex]) -> Path {
    let mut path = Path::new();
    let Some(first) = vertices.first() else {
        return path;
    };

    path.move_to(first.x, first.top);
    for vertex in &vertices[1..] {
        path.line_to(vertex.x, vertex.top);
    }
    for vertex in vertices.iter().rev() {
        path.line_to(vertex.x, vertex.bottom);
    }
    path.close();
    path
}

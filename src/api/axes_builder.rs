use serde::{Deserialize, Serialize};

use crate::core::{TimeScale, ValueScale, ViewWindow, format_si_with_precision, tick_step};
use crate::error::ChartResult;
use crate::render::{LineStrokeStyle, TextHAlign};
use crate::scene::{LineShape, Shape, TextShape};

use super::{ChartConfig, FilteredDataset};

/// Gap between a tick mark and its label.
const TICK_PADDING: f64 = 3.0;
/// Baseline offsets (in em) that center labels on their tick.
const X_LABEL_DY_EM: f64 = 0.71;
const Y_LABEL_DY_EM: f64 = 0.32;

/// Scales shared by the axes, curves and cursor of one update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotScales {
    pub time: TimeScale,
    pub value: ValueScale,
}

/// Fits the time scale to the window and the value scale to the visible
/// samples: `[min y, max y]` for lines, `[min y0, max y1]` for stacked
/// areas.
///
/// Returns `None` for treemap data, which has no axes.
pub fn build_scales(
    config: &ChartConfig,
    filtered: &FilteredDataset,
    window: ViewWindow,
) -> ChartResult<Option<PlotScales>> {
    let (range_start, range_end) = config.time_range();
    let bottom = config.plot_bottom();
    let value = match filtered {
        FilteredDataset::Lines(series) => ValueScale::from_values(
            series
                .iter()
                .flat_map(|line| line.values.iter().map(|point| (point.y, point.y))),
            bottom,
            0.0,
        )?,
        FilteredDataset::Stacked(series) => ValueScale::from_values(
            series
                .iter()
                .flat_map(|line| line.values.iter().map(|point| (point.y0, point.y1))),
            bottom,
            0.0,
        )?,
        FilteredDataset::Treemap(_) => return Ok(None),
    };
    let time = TimeScale::from_window(window, range_start, range_end)?;
    Ok(Some(PlotScales { time, value }))
}

/// Year ticks of the x-axis, keyed by year, in axis-group coordinates
/// (baseline at `y = 0`).
#[must_use]
pub fn x_axis_shapes(config: &ChartConfig, time: TimeScale) -> Vec<(String, Shape)> {
    let style = &config.style;
    let mut shapes = Vec::new();
    for tick in time.year_ticks() {
        let x = time.year_to_pixel(tick.year);
        let length = if tick.major {
            style.major_tick_length
        } else {
            style.minor_tick_length
        };
        shapes.push((
            format!("{}/tick", tick.year),
            Shape::Line(LineShape {
                x1: x,
                y1: 0.0,
                x2: x,
                y2: length,
                stroke: style.axis_color,
                stroke_width: 1.0,
                style: LineStrokeStyle::Solid,
                opacity: 1.0,
            }),
        ));
        if let Some(label) = tick.label {
            let y = style.major_tick_length
                + TICK_PADDING
                + X_LABEL_DY_EM * style.axis_font_size_px;
            shapes.push((
                format!("{}/label", tick.year),
                Shape::Text(TextShape {
                    text: label,
                    x,
                    y,
                    font_size_px: style.axis_font_size_px,
                    fill: style.label_color,
                    h_align: TextHAlign::Center,
                    clip: None,
                    opacity: 1.0,
                }),
            ));
        }
    }
    shapes
}

/// Value ticks of the y-axis plus the axis title, in axis-group
/// coordinates (tick marks point left from `x = 0`).
///
/// Only ticks of the natural set carry a label; the extension ticks are
/// shorter and unlabelled. Extension ticks may fall outside the plot.
#[must_use]
pub fn y_axis_shapes(config: &ChartConfig, value: ValueScale) -> Vec<(String, Shape)> {
    let style = &config.style;
    let mut shapes = Vec::new();
    let ticks = value.extended_ticks(style.y_axis_subdivisions);
    let step = tick_step(&ticks);
    for tick in &ticks {
        let key = tick.key(step);
        let y = value.value_to_pixel(tick.value);
        let length = if tick.major {
            style.major_tick_length
        } else {
            style.minor_tick_length
        };
        shapes.push((
            format!("{key}/tick"),
            Shape::Line(LineShape {
                x1: 0.0,
                y1: y,
                x2: -length,
                y2: y,
                stroke: style.axis_color,
                stroke_width: 1.0,
                style: LineStrokeStyle::Solid,
                opacity: 1.0,
            }),
        ));
        if tick.major {
            shapes.push((
                format!("{key}/label"),
                Shape::Text(TextShape {
                    text: format_si_with_precision(tick.value, style.value_precision),
                    x: -(style.major_tick_length + TICK_PADDING),
                    y: y + Y_LABEL_DY_EM * style.axis_font_size_px,
                    font_size_px: style.axis_font_size_px,
                    fill: style.label_color,
                    h_align: TextHAlign::Right,
                    clip: None,
                    opacity: 1.0,
                }),
            ));
        }
    }
    if !config.y_axis_title.is_empty() {
        let (dx, dy) = style.title_offset;
        shapes.push((
            "title".to_owned(),
            Shape::Text(TextShape {
                text: config.y_axis_title.clone(),
                x: dx,
                y: dy,
                font_size_px: style.title_font_size_px,
                fill: style.title_color,
                h_align: TextHAlign::Left,
                clip: None,
                opacity: 1.0,
            }),
        ));
    }
    shapes
}

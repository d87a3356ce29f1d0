#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{LABEL_TEXT, project_area_path, project_line_path, projection_overlay};
use crate::render::{LineStrokeStyle, TextHAlign};
use crate::scene::{LineShape, PathShape, RectShape, Shape, TextShape};

use super::{ChartConfig, ChartStyle, FilteredDataset, PlotScales};

/// One path per series keyed by series name, colored by position in the
/// filtered data.
///
/// Lines are stroked monotone curves, stacked series filled bands. Series
/// left without samples yield an empty path and draw nothing.
#[must_use]
pub fn curve_shapes(
    style: &ChartStyle,
    filtered: &FilteredDataset,
    scales: PlotScales,
) -> Vec<(String, Shape)> {
    match filtered {
        FilteredDataset::Lines(series) => {
            #[cfg(feature = "parallel-projection")]
            let iter = series.par_iter().enumerate();
            #[cfg(not(feature = "parallel-projection"))]
            let iter = series.iter().enumerate();
            iter.map(|(index, line)| {
                let path = project_line_path(&line.values, scales.time, scales.value);
                (
                    line.name.clone(),
                    Shape::Path(PathShape {
                        path,
                        fill: None,
                        stroke: Some(style.series_color(index)),
                        stroke_width: style.curve_stroke_width,
                        opacity: style.line_opacity,
                    }),
                )
            })
            .collect()
        }
        FilteredDataset::Stacked(series) => {
            #[cfg(feature = "parallel-projection")]
            let iter = series.par_iter().enumerate();
            #[cfg(not(feature = "parallel-projection"))]
            let iter = series.iter().enumerate();
            iter.map(|(index, band)| {
                let path = project_area_path(&band.values, scales.time, scales.value);
                (
                    band.name.clone(),
                    Shape::Path(PathShape {
                        path,
                        fill: Some(style.series_color(index)),
                        stroke: None,
                        stroke_width: style.curve_stroke_width,
                        opacity: style.area_opacity,
                    }),
                )
            })
            .collect()
        }
        FilteredDataset::Treemap(_) => Vec::new(),
    }
}

/// Shaded forecast region and its label, empty when the window ends at or
/// before the projection year.
#[must_use]
pub fn projection_shapes(config: &ChartConfig, scales: PlotScales) -> Vec<(String, Shape)> {
    let style = &config.style;
    let Some(overlay) =
        projection_overlay(scales.time, style.projection_year, config.plot_bottom())
    else {
        return Vec::new();
    };
    vec![
        (
            "region".to_owned(),
            Shape::Rect(RectShape {
                x: overlay.x,
                y: 0.0,
                width: overlay.width,
                height: overlay.height,
                fill: style.projection_fill,
                opacity: style.projection_opacity,
            }),
        ),
        (
            "label".to_owned(),
            Shape::Text(TextShape {
                text: LABEL_TEXT.to_owned(),
                x: overlay.label_x,
                y: overlay.label_y,
                font_size_px: style.title_font_size_px,
                fill: style.label_color,
                h_align: TextHAlign::Left,
                clip: None,
                opacity: 1.0,
            }),
        ),
    ]
}

/// Dashed boundary guide, drawn only when the shaded region starts
/// exactly at the projection year.
#[must_use]
pub fn guide_shapes(config: &ChartConfig, scales: PlotScales) -> Vec<(String, Shape)> {
    let style = &config.style;
    let guide_x = projection_overlay(scales.time, style.projection_year, config.plot_bottom())
        .and_then(|overlay| overlay.guide_x);
    let Some(x) = guide_x else {
        return Vec::new();
    };
    let (on, off) = style.guide_dash;
    vec![(
        "guide".to_owned(),
        Shape::Line(LineShape {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: config.plot_bottom(),
            stroke: style.label_color,
            stroke_width: style.guide_stroke_width,
            style: LineStrokeStyle::Dashed { on, off },
            opacity: 1.0,
        }),
    )]
}

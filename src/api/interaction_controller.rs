use std::fmt::Write as _;

use tracing::{trace, warn};

use crate::core::{ChartType, TreemapCell, ValueScale, format_si_with_precision};
use crate::error::ChartResult;
use crate::interaction::{Legend, LegendEntry, PointerSource, sort_legend};
use crate::render::{LineStrokeStyle, Renderer, escape_xml};
use crate::scene::{CircleShape, LineShape, SceneLayerKind, Shape};

use super::{Chart, ChartConfig, ChartStyle, FilteredDataset, Orientation, OverlaySurface};

/// Popup content shown while the dataset is empty.
pub const NO_DATA_HTML: &str = concat!(
    r#"<div class="legend"><div class="legend-header">"#,
    "No data matches current selection",
    "</div></div>"
);

/// Builds the legend for `year`: one row per series that has a sample at
/// that year, largest anchor first.
///
/// Series without a sample are skipped. Colors follow the series position
/// in the filtered data.
#[must_use]
pub fn hover_legend(filtered: &FilteredDataset, year: i32, style: &ChartStyle) -> Legend {
    let mut legend = Legend::new();
    match filtered {
        FilteredDataset::Lines(series) => {
            for (index, line) in series.iter().enumerate() {
                match line.point_at_year(year) {
                    Some(point) => legend.push(LegendEntry {
                        name: line.name.clone(),
                        value: point.y,
                        anchor: point.y,
                        color: style.series_color(index),
                    }),
                    None => warn!(series = %line.name, year, "no sample under cursor"),
                }
            }
        }
        FilteredDataset::Stacked(series) => {
            for (index, band) in series.iter().enumerate() {
                match band.point_at_year(year) {
                    Some(point) => legend.push(LegendEntry {
                        name: band.name.clone(),
                        value: point.value(),
                        anchor: point.y1,
                        color: style.series_color(index),
                    }),
                    None => warn!(series = %band.name, year, "no sample under cursor"),
                }
            }
        }
        FilteredDataset::Treemap(_) => {}
    }
    sort_legend(&mut legend);
    legend
}

/// Tooltip body for the cursor: year header plus one swatch/name/value row
/// per legend entry.
#[must_use]
pub fn legend_html(year: i32, legend: &[LegendEntry], style: &ChartStyle) -> String {
    let radius = style.legend_swatch_radius;
    let mut body = String::new();
    for entry in legend {
        let _ = write!(
            body,
            concat!(
                r#"<div class="legend-item"><span class="legend-circle">"#,
                r#"<svg width="{d}px" height="{d}px"><circle cx="{r}px" cy="{r}px" r="{r}px" "#,
                r#"fill="{color}"></circle></svg></span>"#,
                r#"<span class="legend-name">{name}</span>"#,
                r#"<span class="legend-value">{value}</span></div>"#
            ),
            d = 2.0 * radius,
            r = radius,
            color = entry.color,
            name = escape_xml(&entry.name),
            value = format_si_with_precision(entry.value, style.value_precision),
        );
    }
    legend_box(&year.to_string(), &body)
}

/// Tooltip body for a treemap cell: name header and formatted value.
#[must_use]
pub fn cell_tooltip_html(cell: &TreemapCell, style: &ChartStyle) -> String {
    legend_box(
        &escape_xml(&cell.name),
        &format_si_with_precision(cell.value, style.value_precision),
    )
}

fn legend_box(header: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<div class="legend"><div class="legend-header">{header}</div>"#,
            r#"<div class="legend-body">{body}</div></div>"#
        ),
        header = header,
        body = body
    )
}

/// Vertical rule from the plot top to the x-axis baseline.
#[must_use]
pub fn cursor_shapes(config: &ChartConfig, x: f64) -> Vec<(String, Shape)> {
    let style = &config.style;
    vec![(
        "rule".to_owned(),
        Shape::Line(LineShape {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: config.plot_bottom(),
            stroke: style.cursor_color,
            stroke_width: style.cursor_stroke_width,
            style: LineStrokeStyle::Solid,
            opacity: 1.0,
        }),
    )]
}

/// One dot per legend row on the rule, keyed by row position.
#[must_use]
pub fn cursor_dot_shapes(
    style: &ChartStyle,
    legend: &[LegendEntry],
    x: f64,
    value: ValueScale,
) -> Vec<(String, Shape)> {
    legend
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            (
                index.to_string(),
                Shape::Circle(CircleShape {
                    cx: x,
                    cy: value.value_to_pixel(entry.anchor),
                    radius: style.cursor_dot_radius,
                    fill: entry.color,
                    opacity: 1.0,
                }),
            )
        })
        .collect()
}

impl<R: Renderer, S: OverlaySurface> Chart<R, S> {
    /// Mouse moved to canvas pixel `(x, y)`.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        self.handle_pointer_move(PointerSource::Mouse, x, y)
    }

    /// Mouse left the chart.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.interaction.source = Some(PointerSource::Mouse);
        self.clear_cursor()
    }

    pub fn touch_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        self.handle_pointer_move(PointerSource::Touch, x, y)
    }

    pub fn touch_end(&mut self) -> ChartResult<()> {
        self.interaction.source = Some(PointerSource::Touch);
        self.clear_cursor()
    }

    /// Drops the cursor rule, dots and tooltip, e.g. before the host swaps
    /// the dataset so no stale cursor points at removed series.
    pub fn hide_cursor(&mut self) -> ChartResult<()> {
        self.clear_cursor()
    }

    fn handle_pointer_move(&mut self, source: PointerSource, x: f64, y: f64) -> ChartResult<()> {
        if self.no_data {
            trace!("pointer ignored while no data is shown");
            return Ok(());
        }
        if !x.is_finite() || !y.is_finite() {
            return Ok(());
        }
        self.interaction.source = Some(source);
        self.interaction.pointer = Some((x, y));

        if self.config.chart_type == ChartType::Treemap {
            self.hover_treemap(x, y);
            Ok(())
        } else {
            self.hover_curves(x)
        }
    }

    fn hover_curves(&mut self, x: f64) -> ChartResult<()> {
        let Some(scales) = self.scales else {
            return Ok(());
        };
        let local_x = x - self.config.margin.left;
        if !scales.time.contains_pixel(local_x) {
            return self.clear_cursor();
        }
        let Some(year) = scales.time.pixel_to_year(local_x) else {
            return self.clear_cursor();
        };
        if self.hover_cache == Some(year) && self.interaction.is_hovering() {
            trace!(year, "cursor year unchanged");
            return Ok(());
        }

        let legend = hover_legend(&self.filtered, year, &self.config.style);
        let rule_x = scales.time.year_to_pixel(year);
        self.scene.sync_layer(
            SceneLayerKind::Cursor,
            cursor_shapes(&self.config, rule_x),
            0.0,
        );
        if self.config.chart_type == ChartType::Line {
            self.scene.sync_layer(
                SceneLayerKind::CursorDots,
                cursor_dot_shapes(&self.config.style, &legend, rule_x, scales.value),
                0.0,
            );
        }

        let offset = self.config.page_offset;
        let margin = self.config.margin;
        self.tooltip.update(
            &legend_html(year, &legend, &self.config.style),
            offset.left + margin.left + rule_x,
            offset.scroll_top + margin.top + offset.top,
            Some(Orientation::Right),
        );
        trace!(year, rows = legend.len(), "cursor moved");
        self.interaction.hover_year(year, legend);
        self.hover_cache = Some(year);
        self.render()
    }

    /// Shows the tooltip of the cell under the pointer. Gaps between cells
    /// leave the current tooltip alone.
    fn hover_treemap(&mut self, x: f64, y: f64) {
        let local_x = x - self.config.margin.left;
        let local_y = y - self.config.margin.top;
        let Some(cell) = self.cells.iter().find(|cell| cell.contains(local_x, local_y)) else {
            trace!(x, y, "pointer over treemap gap");
            return;
        };
        let offset = self.config.page_offset;
        self.tooltip.update(
            &cell_tooltip_html(cell, &self.config.style),
            offset.left + local_x,
            offset.scroll_top + offset.top + local_y,
            Some(Orientation::Top),
        );
        let name = cell.name.clone();
        self.interaction.hover_cell(name);
    }

    fn clear_cursor(&mut self) -> ChartResult<()> {
        self.tooltip.hide();
        let was_hovering = self.interaction.is_hovering();
        self.interaction.leave();
        self.hover_cache = None;
        let removed = self.scene.clear_layer(SceneLayerKind::Cursor)
            + self.scene.clear_layer(SceneLayerKind::CursorDots);
        if was_hovering || removed > 0 {
            self.render()
        } else {
            Ok(())
        }
    }
}

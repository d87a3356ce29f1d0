use serde::{Deserialize, Serialize};

use crate::core::{ChartType, DEFAULT_PROJECTION_YEAR, Margin, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Series palette, cycled by series index.
pub const DEFAULT_PALETTE: [Color; 7] = [
    Color::rgb8(0x00, 0xe3, 0xe6),
    Color::rgb8(0x67, 0x97, 0xfd),
    Color::rgb8(0x6b, 0xd3, 0x84),
    Color::rgb8(0x95, 0x4e, 0x9f),
    Color::rgb8(0xa8, 0x48, 0x57),
    Color::rgb8(0xcc, 0xe9, 0x82),
    Color::rgb8(0xeb, 0xa5, 0x62),
];

pub const DEFAULT_TRANSITION_MS: f64 = 500.0;
pub const DEFAULT_WINDOW: (i32, i32) = (2010, 2050);

/// Position of the chart canvas on the host page, used to anchor tooltip
/// and popup surfaces in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageOffset {
    pub left: f64,
    pub top: f64,
    pub scroll_top: f64,
}

/// Visual constants of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub palette: Vec<Color>,
    pub transition_ms: f64,
    pub curve_stroke_width: f64,
    pub line_opacity: f64,
    pub area_opacity: f64,
    pub projection_year: i32,
    pub projection_fill: Color,
    pub projection_opacity: f64,
    pub guide_dash: (f64, f64),
    pub guide_stroke_width: f64,
    pub label_color: Color,
    pub axis_color: Color,
    pub axis_font_size_px: f64,
    pub title_color: Color,
    pub title_font_size_px: f64,
    pub title_offset: (f64, f64),
    pub major_tick_length: f64,
    pub minor_tick_length: f64,
    /// Value-axis minor ticks per natural step.
    pub y_axis_subdivisions: usize,
    pub cursor_color: Color,
    pub cursor_stroke_width: f64,
    pub cursor_dot_radius: f64,
    pub legend_swatch_radius: f64,
    pub treemap_padding: f64,
    pub treemap_label_min_size: f64,
    pub treemap_label_line_height: f64,
    pub treemap_label_font_size_px: f64,
    pub treemap_label_color: Color,
    /// Significant digits of SI-formatted values.
    pub value_precision: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            transition_ms: DEFAULT_TRANSITION_MS,
            curve_stroke_width: 1.5,
            line_opacity: 1.0,
            area_opacity: 0.8,
            projection_year: DEFAULT_PROJECTION_YEAR,
            projection_fill: Color::rgb8(0x16, 0x51, 0x63),
            projection_opacity: 0.2,
            guide_dash: (4.0, 4.0),
            guide_stroke_width: 0.5,
            label_color: Color::LIGHT_GRAY,
            axis_color: Color::LIGHT_GRAY,
            axis_font_size_px: 10.0,
            title_color: Color::WHITE,
            title_font_size_px: 12.0,
            title_offset: (-20.0, -5.0),
            major_tick_length: 6.0,
            minor_tick_length: 4.0,
            y_axis_subdivisions: 1,
            cursor_color: Color::LIGHT_GRAY,
            cursor_stroke_width: 1.0,
            cursor_dot_radius: 3.0,
            legend_swatch_radius: 4.0,
            treemap_padding: 1.0,
            treemap_label_min_size: 50.0,
            treemap_label_line_height: 14.0,
            treemap_label_font_size_px: 12.0,
            treemap_label_color: Color::WHITE,
            value_precision: 2,
        }
    }
}

impl ChartStyle {
    /// Palette color of the series at `index`.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::LIGHT_GRAY;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "style palette must not be empty".to_owned(),
            ));
        }
        for color in &self.palette {
            color.validate()?;
        }
        for color in [
            self.projection_fill,
            self.label_color,
            self.axis_color,
            self.title_color,
            self.cursor_color,
            self.treemap_label_color,
        ] {
            color.validate()?;
        }
        if !self.transition_ms.is_finite() || self.transition_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "transition duration must be finite and >= 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("curve_stroke_width", self.curve_stroke_width),
            ("guide_stroke_width", self.guide_stroke_width),
            ("cursor_stroke_width", self.cursor_stroke_width),
            ("axis_font_size_px", self.axis_font_size_px),
            ("title_font_size_px", self.title_font_size_px),
            ("treemap_label_font_size_px", self.treemap_label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("line_opacity", self.line_opacity),
            ("area_opacity", self.area_opacity),
            ("projection_opacity", self.projection_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be in [0, 1]"
                )));
            }
        }
        if self.y_axis_subdivisions == 0 {
            return Err(ChartError::InvalidData(
                "y-axis subdivisions must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Public chart bootstrap configuration.
///
/// `width` and `height` size the plot group; the canvas adds the margins
/// around it. This type is serializable so hosts can persist chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_margin")]
    pub margin: Margin,
    #[serde(default)]
    pub y_axis_title: String,
    /// Initial slider range for line and area charts.
    #[serde(default = "default_window")]
    pub default_window: (i32, i32),
    /// Initial slider year for treemaps; the current calendar year when
    /// unset.
    #[serde(default)]
    pub default_year: Option<i32>,
    #[serde(default)]
    pub page_offset: PageOffset,
    #[serde(default)]
    pub style: ChartStyle,
}

fn default_margin() -> Margin {
    Margin::new(20.0, 30.0, 20.0, 30.0)
}

fn default_window() -> (i32, i32) {
    DEFAULT_WINDOW
}

impl ChartConfig {
    #[must_use]
    pub fn new(chart_type: ChartType, width: f64, height: f64) -> Self {
        let margin = if chart_type == ChartType::Treemap {
            Margin::zero()
        } else {
            default_margin()
        };
        Self {
            chart_type,
            width,
            height,
            margin,
            y_axis_title: String::new(),
            default_window: DEFAULT_WINDOW,
            default_year: None,
            page_offset: PageOffset::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_y_axis_title(mut self, title: impl Into<String>) -> Self {
        self.y_axis_title = title.into();
        self
    }

    #[must_use]
    pub fn with_default_window(mut self, min_year: i32, max_year: i32) -> Self {
        self.default_window = (min_year, max_year);
        self
    }

    #[must_use]
    pub fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = Some(year);
        self
    }

    #[must_use]
    pub fn with_page_offset(mut self, page_offset: PageOffset) -> Self {
        self.page_offset = page_offset;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Canvas size: the plot group plus margins, rounded up.
    #[must_use]
    pub fn canvas_viewport(&self) -> Viewport {
        let width = self.width + self.margin.left + self.margin.right;
        let height = self.height + self.margin.top + self.margin.bottom;
        Viewport::new(width.max(0.0).ceil() as u32, height.max(0.0).ceil() as u32)
    }

    /// Bottom of the plot area (x-axis baseline) in plot-group pixels.
    #[must_use]
    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }

    /// Horizontal pixel range of the time axis in plot-group pixels.
    #[must_use]
    pub fn time_range(&self) -> (f64, f64) {
        (self.margin.left, self.width - self.margin.right)
    }

    pub fn validate(&self) -> ChartResult<()> {
        let invalid_viewport = || ChartError::InvalidViewport {
            width: self.width.max(0.0) as u32,
            height: self.height.max(0.0) as u32,
        };
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(invalid_viewport());
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid_viewport());
        }
        self.margin.validate()?;
        if self.chart_type.has_time_axis() {
            let (start, end) = self.time_range();
            if end <= start || self.plot_bottom() <= 0.0 {
                return Err(invalid_viewport());
            }
        }
        let (min_year, max_year) = self.default_window;
        if min_year > max_year {
            return Err(ChartError::InvalidWindow { min_year, max_year });
        }
        self.style.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, DEFAULT_PALETTE};
    use crate::core::ChartType;

    #[test]
    fn palette_matches_dashboard_colors() {
        let hex: Vec<String> = DEFAULT_PALETTE.iter().map(|c| c.to_hex()).collect();
        assert_eq!(
            hex,
            vec!["#00e3e6", "#6797fd", "#6bd384", "#954e9f", "#a84857", "#cce982", "#eba562"]
        );
    }

    #[test]
    fn margins_that_swallow_the_plot_are_rejected() {
        let config = ChartConfig::new(ChartType::Line, 50.0, 300.0);
        assert!(config.validate().is_err());
        let treemap = ChartConfig::new(ChartType::Treemap, 50.0, 300.0);
        assert!(treemap.validate().is_ok());
    }

    #[test]
    fn json_round_trip_fills_defaults() {
        let config = ChartConfig::from_json_str(r#"{"chart_type":"area","width":640,"height":320}"#)
            .expect("config");
        assert_eq!(config.default_window, (2010, 2050));
        assert_eq!(config.style.transition_ms, 500.0);
        let json = config.to_json_pretty().expect("json");
        assert_eq!(ChartConfig::from_json_str(&json).expect("reparse"), config);
    }
}

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{decimal_to_f64, year_of_time, year_to_time};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot group, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Chart families supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Area,
    Treemap,
}

impl ChartType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Area => "area",
            Self::Treemap => "treemap",
        }
    }

    /// Line and area charts share the axes + curves pipeline.
    #[must_use]
    pub fn has_time_axis(self) -> bool {
        !matches!(self, Self::Treemap)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "area" => Ok(Self::Area),
            "treemap" => Ok(Self::Treemap),
            other => Err(ChartError::InvalidData(format!(
                "unsupported chart type `{other}`"
            ))),
        }
    }
}

/// Shared access to the time coordinate of any series sample.
pub trait TimePoint: Copy {
    fn time(&self) -> f64;

    fn is_finite(&self) -> bool;

    #[must_use]
    fn year(&self) -> Option<i32> {
        year_of_time(self.time())
    }
}

/// Line sample: `x` is unix seconds, `y` the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a sample anchored at January 1st of `year`.
    #[must_use]
    pub fn from_year(year: i32, y: f64) -> Self {
        Self::new(year_to_time(year), y)
    }

    pub fn from_decimal_year(year: i32, value: Decimal) -> ChartResult<Self> {
        Ok(Self::from_year(year, decimal_to_f64(value, "value")?))
    }
}

impl TimePoint for DataPoint {
    fn time(&self) -> f64 {
        self.x
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Stacked-area sample: `y1 - y0` is the series contribution and `y0` the
/// cumulative baseline of the series stacked below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

impl StackedPoint {
    #[must_use]
    pub fn new(x: f64, y0: f64, y1: f64) -> Self {
        Self { x, y0, y1 }
    }

    #[must_use]
    pub fn from_year(year: i32, y0: f64, y1: f64) -> Self {
        Self::new(year_to_time(year), y0, y1)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.y1 - self.y0
    }
}

impl TimePoint for StackedPoint {
    fn time(&self) -> f64 {
        self.x
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y0.is_finite() && self.y1.is_finite()
    }
}

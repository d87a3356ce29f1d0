pub mod area_series;
pub mod format;
pub mod line_series;
pub mod path;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod treemap;
pub mod types;
pub mod value_scale;
pub mod windowing;

pub use area_series::{BandVertex, band_path, project_area_path};
pub use format::{format_si, format_si_with_precision};
pub use line_series::{monotone_x_path, project_line_path};
pub use path::{Path, PathCommand};
pub use primitives::{nearest_year, year_to_time};
pub use projection::{DEFAULT_PROJECTION_YEAR, LABEL_TEXT, ProjectionOverlay, projection_overlay};
pub use scale::{LinearScale, nice_ticks};
pub use series::{Dataset, Series};
pub use time_scale::{TimeScale, YearTick};
pub use treemap::{Hierarchy, TreemapCell, TreemapLayout, TreemapLeaf, squarify};
pub use types::{ChartType, DataPoint, Margin, StackedPoint, TimePoint, Viewport};
pub use value_scale::{ValueScale, ValueTick, extended_ticks, tick_step};
pub use windowing::{ViewWindow, series_in_window};

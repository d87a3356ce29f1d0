mod axes_builder;
mod chart;
mod chart_config;
mod command;
mod curves_builder;
mod data_controller;
mod interaction_controller;
mod json_contract;
mod overlay;
mod plot_coordinator;
mod snapshot;
mod time_slider;
mod treemap_builder;

pub use axes_builder::{PlotScales, build_scales, x_axis_shapes, y_axis_shapes};
pub use chart::Chart;
pub use chart_config::{
    ChartConfig, ChartStyle, DEFAULT_PALETTE, DEFAULT_TRANSITION_MS, DEFAULT_WINDOW, PageOffset,
};
pub use command::ChartCommand;
pub use curves_builder::{curve_shapes, guide_shapes, projection_shapes};
pub use data_controller::{FilteredDataset, filter_dataset, normalize_dataset};
pub use interaction_controller::{
    NO_DATA_HTML, cell_tooltip_html, cursor_dot_shapes, cursor_shapes, hover_legend, legend_html,
};
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
pub use overlay::{
    OVERLAY_PADDING, Orientation, OverlayKind, OverlayState, OverlaySurface, place_popup,
    place_tooltip,
};
pub use snapshot::ChartSnapshot;
pub use time_slider::{SLIDER_TICK_TARGET, TimeSlider};
pub use treemap_builder::{cell_shapes, label_shapes, layout_cells};

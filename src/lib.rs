//! energy-charts: chart engine for energy pathway dashboards.
//!
//! The crate draws three fixed chart families (monotone line curves,
//! stacked areas and treemaps) from a normalized time-series dataset. A
//! [`Chart`] filters the dataset through a year window, derives scales,
//! axes and shapes, and keeps a keyed scene in sync with them across
//! updates. Attribute changes animate over a shared transition clock and a
//! cursor rule with a synchronized legend follows the pointer.
//!
//! Layers follow a strict split: `core` is pure geometry and data,
//! `scene` the backend-independent element graph, `render` the backends,
//! and `api` the orchestrating facade.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{Chart, ChartCommand, ChartConfig, ChartSnapshot, ChartStyle};
pub use error::{ChartError, ChartResult};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ChartType, ViewWindow, Viewport};
use crate::interaction::InteractionState;
use crate::render::{RenderFrame, Renderer};
use crate::scene::SceneLayerKind;

use super::{Chart, OverlaySurface};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
///
/// `frame` is sampled at every transition's target, so two snapshots of
/// the same state compare equal regardless of the animation clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub chart_type: ChartType,
    pub viewport: Viewport,
    pub window: ViewWindow,
    pub slider_bounds: (i32, i32),
    pub no_data: bool,
    pub canvas_opacity: f64,
    pub interaction: InteractionState,
    pub layer_counts: IndexMap<SceneLayerKind, usize>,
    pub frame: RenderFrame,
}

impl ChartSnapshot {
    #[must_use]
    pub fn layer_count(&self, kind: SceneLayerKind) -> usize {
        self.layer_counts.get(&kind).copied().unwrap_or(0)
    }
}

impl<R: Renderer, S: OverlaySurface> Chart<R, S> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            chart_type: self.config.chart_type,
            viewport: self.config.canvas_viewport(),
            window: self.slider.window(),
            slider_bounds: self.slider.bounds(),
            no_data: self.no_data,
            canvas_opacity: self.canvas_opacity(),
            interaction: self.interaction.clone(),
            layer_counts: SceneLayerKind::ALL
                .into_iter()
                .map(|kind| (kind, self.scene.layer_len(kind)))
                .collect(),
            frame: self.settled_frame(),
        }
    }
}

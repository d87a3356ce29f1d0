use chrono::{Datelike, Utc};
use tracing::{debug, info};

use crate::core::{ChartType, Dataset, TreemapCell, ViewWindow};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::render::{RenderFrame, Renderer};
use crate::scene::{Scene, SceneLayerKind};

use super::{
    ChartConfig, FilteredDataset, OverlayState, OverlaySurface, PlotScales, TimeSlider,
    normalize_dataset,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// A `Chart` owns one dataset, the time slider selecting the visible
/// window, the keyed scene drawn by `R`, and the two floating surfaces
/// (`tooltip`, `popup`) it drives. Every mutation goes through its public
/// operations or [`Chart::dispatch`].
pub struct Chart<R: Renderer, S: OverlaySurface = OverlayState> {
    pub(super) config: ChartConfig,
    pub(super) renderer: R,
    pub(super) tooltip: S,
    pub(super) popup: S,
    pub(super) dataset: Dataset,
    pub(super) filtered: FilteredDataset,
    pub(super) slider: TimeSlider,
    pub(super) scales: Option<PlotScales>,
    pub(super) cells: Vec<TreemapCell>,
    pub(super) scene: Scene,
    pub(super) interaction: InteractionState,
    pub(super) no_data: bool,
    pub(super) hover_cache: Option<i32>,
}

impl<R: Renderer> Chart<R, OverlayState> {
    /// Builds a chart with in-memory tooltip and popup surfaces and draws
    /// the initial frame.
    pub fn new(config: ChartConfig, dataset: Dataset, renderer: R) -> ChartResult<Self> {
        Self::with_surfaces(
            config,
            dataset,
            renderer,
            OverlayState::tooltip(),
            OverlayState::popup(),
        )
    }
}

impl<R: Renderer, S: OverlaySurface> Chart<R, S> {
    /// Builds a chart driving host-provided overlay surfaces.
    ///
    /// The slider is bound to the dataset's observed years (or the
    /// configured defaults when the dataset is empty) and the first
    /// filter + render pass runs before returning.
    pub fn with_surfaces(
        config: ChartConfig,
        dataset: Dataset,
        renderer: R,
        tooltip: S,
        popup: S,
    ) -> ChartResult<Self> {
        config.validate()?;
        let dataset = normalize_dataset(config.chart_type, dataset)?;
        let slider = initial_slider(&config, &dataset)?;

        let mut scene = Scene::new();
        let margin = config.margin;
        let plot_origin = (margin.left, margin.top);
        for kind in SceneLayerKind::ALL {
            scene.layer_mut(kind).origin = match kind {
                SceneLayerKind::XAxis => (margin.left, margin.top + config.plot_bottom()),
                SceneLayerKind::YAxis => (2.0 * margin.left, margin.top),
                _ => plot_origin,
            };
        }

        info!(
            chart_type = %config.chart_type,
            series = dataset.len(),
            window = ?slider.window(),
            "chart constructed"
        );
        let mut chart = Self {
            config,
            renderer,
            tooltip,
            popup,
            dataset,
            filtered: FilteredDataset::default(),
            slider,
            scales: None,
            cells: Vec::new(),
            scene,
            interaction: InteractionState::default(),
            no_data: false,
            hover_cache: None,
        };
        chart.update_plot()?;
        Ok(chart)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.config.chart_type
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn filtered(&self) -> &FilteredDataset {
        &self.filtered
    }

    #[must_use]
    pub fn window(&self) -> ViewWindow {
        self.slider.window()
    }

    #[must_use]
    pub fn slider(&self) -> &TimeSlider {
        &self.slider
    }

    #[must_use]
    pub fn scales(&self) -> Option<PlotScales> {
        self.scales
    }

    /// Treemap cells of the last layout, in hierarchy order.
    #[must_use]
    pub fn cells(&self) -> &[TreemapCell] {
        &self.cells
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn is_no_data(&self) -> bool {
        self.no_data
    }

    /// 0 while the "no data" popup replaces the chart, 1 otherwise.
    #[must_use]
    pub fn canvas_opacity(&self) -> f64 {
        if self.no_data { 0.0 } else { 1.0 }
    }

    #[must_use]
    pub fn tooltip(&self) -> &S {
        &self.tooltip
    }

    pub fn tooltip_mut(&mut self) -> &mut S {
        &mut self.tooltip
    }

    #[must_use]
    pub fn popup(&self) -> &S {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut S {
        &mut self.popup
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.scene.now_ms()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scene.is_animating()
    }

    /// Frame at the current clock time.
    #[must_use]
    pub fn current_frame(&self) -> RenderFrame {
        self.scene
            .frame(self.config.canvas_viewport(), self.canvas_opacity())
    }

    /// Frame with every transition at its target.
    #[must_use]
    pub fn settled_frame(&self) -> RenderFrame {
        self.scene
            .settled_frame(self.config.canvas_viewport(), self.canvas_opacity())
    }

    /// Advances the animation clock and redraws.
    pub fn tick(&mut self, delta_ms: f64) -> ChartResult<()> {
        self.scene.advance(delta_ms);
        self.render()
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.current_frame();
        self.renderer.render(&frame)
    }

    /// Renders the current frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.current_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }
}

fn initial_slider(config: &ChartConfig, dataset: &Dataset) -> ChartResult<TimeSlider> {
    let observed = dataset.observed_year_range();
    if config.chart_type.has_time_axis() {
        let bounds = observed.unwrap_or(config.default_window);
        return TimeSlider::range(bounds, config.default_window);
    }
    let year = config.default_year.unwrap_or_else(|| Utc::now().year());
    let bounds = observed.unwrap_or((year, year));
    debug!(year, ?bounds, "treemap slider defaults");
    Ok(TimeSlider::single(bounds, year))
}

use tracing::debug;

use crate::core::ChartType;
use crate::error::ChartResult;
use crate::render::Renderer;
use crate::scene::SceneLayerKind;

use super::{
    Chart, NO_DATA_HTML, OverlaySurface, build_scales, cell_shapes, curve_shapes, guide_shapes,
    label_shapes, layout_cells, projection_shapes, x_axis_shapes, y_axis_shapes,
};

impl<R: Renderer, S: OverlaySurface> Chart<R, S> {
    /// Filters, recomputes the layout for the chart type and redraws.
    ///
    /// An empty dataset hides the canvas and shows the "no data" popup at
    /// the plot center instead. Data conditions never fail this call; only
    /// renderer errors propagate.
    pub fn update_plot(&mut self) -> ChartResult<()> {
        self.filter_data();
        self.no_data = self.dataset.is_empty();
        self.hover_cache = None;

        if self.no_data {
            self.show_no_data();
            return self.render();
        }

        self.popup.hide();
        match self.config.chart_type {
            ChartType::Treemap => self.update_rects(),
            ChartType::Line | ChartType::Area => self.update_curves()?,
        }
        self.render()
    }

    fn show_no_data(&mut self) {
        let offset = self.config.page_offset;
        let margin = self.config.margin;
        self.popup.update(
            NO_DATA_HTML,
            offset.left + margin.left + self.config.width / 2.0,
            margin.top + offset.top + self.config.height / 2.0,
            None,
        );
        self.tooltip.hide();
        self.interaction.leave();
        self.scene.clear_layer(SceneLayerKind::Cursor);
        self.scene.clear_layer(SceneLayerKind::CursorDots);
        debug!(chart_type = %self.config.chart_type, "no data to plot");
    }

    /// Axes, projection marker and curves share one transition.
    fn update_curves(&mut self) -> ChartResult<()> {
        let Some(scales) = build_scales(&self.config, &self.filtered, self.slider.window())? else {
            return Ok(());
        };
        let duration = self.config.style.transition_ms;
        let axis_x = x_axis_shapes(&self.config, scales.time);
        let axis_y = y_axis_shapes(&self.config, scales.value);
        let projection = projection_shapes(&self.config, scales);
        let curves = curve_shapes(&self.config.style, &self.filtered, scales);
        let guide = guide_shapes(&self.config, scales);

        self.scene.sync_layer(SceneLayerKind::XAxis, axis_x, duration);
        self.scene.sync_layer(SceneLayerKind::YAxis, axis_y, duration);
        self.scene.sync_layer(SceneLayerKind::Projection, projection, duration);
        let stats = self.scene.sync_layer(SceneLayerKind::Curves, curves, duration);
        self.scene.sync_layer(SceneLayerKind::Guide, guide, duration);
        self.scales = Some(scales);

        debug!(
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            value_domain = ?scales.value.domain(),
            "curves updated"
        );
        Ok(())
    }

    /// Treemap cells and labels snap to their new layout.
    fn update_rects(&mut self) {
        let Some(hierarchy) = self.filtered.hierarchy() else {
            return;
        };
        let cells = layout_cells(&self.config, hierarchy);
        let style = &self.config.style;
        let rects = cell_shapes(style, &cells);
        let labels = label_shapes(style, &cells);

        let stats = self.scene.sync_layer(SceneLayerKind::Cells, rects, 0.0);
        self.scene.sync_layer(SceneLayerKind::CellLabels, labels, 0.0);
        debug!(
            cells = cells.len(),
            entered = stats.entered,
            exited = stats.exited,
            "treemap updated"
        );
        self.cells = cells;
    }
}

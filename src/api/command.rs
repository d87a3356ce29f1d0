use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Dataset;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{Chart, OverlaySurface};

/// Message objects a host sends to a chart instead of mutating shared UI
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartCommand {
    /// Swap the dataset and redraw.
    UpdateData { dataset: Dataset },
    SetWindow { min_year: i32, max_year: i32 },
    SetYear { year: i32 },
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    TouchMove { x: f64, y: f64 },
    TouchEnd,
    HideCursor,
    /// Advance the animation clock.
    Tick { delta_ms: f64 },
}

impl ChartCommand {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateData { .. } => "update_data",
            Self::SetWindow { .. } => "set_window",
            Self::SetYear { .. } => "set_year",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerLeave => "pointer_leave",
            Self::TouchMove { .. } => "touch_move",
            Self::TouchEnd => "touch_end",
            Self::HideCursor => "hide_cursor",
            Self::Tick { .. } => "tick",
        }
    }
}

impl<R: Renderer, S: OverlaySurface> Chart<R, S> {
    /// Routes a command to the matching public operation.
    pub fn dispatch(&mut self, command: ChartCommand) -> ChartResult<()> {
        trace!(command = command.name(), "dispatch chart command");
        match command {
            ChartCommand::UpdateData { dataset } => {
                self.update_data(dataset)?;
                self.update_plot()
            }
            ChartCommand::SetWindow { min_year, max_year } => self.set_window(min_year, max_year),
            ChartCommand::SetYear { year } => self.set_year(year),
            ChartCommand::PointerMove { x, y } => self.pointer_move(x, y),
            ChartCommand::PointerLeave => self.pointer_leave(),
            ChartCommand::TouchMove { x, y } => self.touch_move(x, y),
            ChartCommand::TouchEnd => self.touch_end(),
            ChartCommand::HideCursor => self.hide_cursor(),
            ChartCommand::Tick { delta_ms } => self.tick(delta_ms),
        }
    }
}

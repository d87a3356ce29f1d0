use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::render::Color;

/// Pointer state machine: the cursor rule is either hidden or parked on a
/// year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Idle,
    Hover,
}

/// Input device that produced the last pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Year the shared cursor rule points at; `None` while no cursor is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorState {
    pub active_year: Option<i32>,
}

/// One legend row of the hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    /// Displayed value: `y` for lines, `y1 - y0` for stacked areas.
    pub value: f64,
    /// Vertical position value: `y` for lines, `y1` for stacked areas.
    pub anchor: f64,
    pub color: Color,
}

/// Legend rows; seven inline slots cover the default palette.
pub type Legend = SmallVec<[LegendEntry; 7]>;

/// Orders legend rows by `anchor`, largest first. Ties keep series order.
pub fn sort_legend(legend: &mut Legend) {
    legend.sort_by_key(|entry| Reverse(OrderedFloat(entry.anchor)));
}

/// Public interaction snapshot exposed to host applications.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    pub mode: InteractionMode,
    pub cursor: CursorState,
    pub legend: Legend,
    pub source: Option<PointerSource>,
    /// Last pointer position in canvas pixels.
    pub pointer: Option<(f64, f64)>,
    /// Treemap cell under the pointer.
    pub hovered_cell: Option<String>,
}

impl InteractionState {
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.mode == InteractionMode::Hover
    }

    #[must_use]
    pub fn active_year(&self) -> Option<i32> {
        self.cursor.active_year
    }

    /// Parks the cursor on `year` with a freshly built legend.
    pub fn hover_year(&mut self, year: i32, legend: Legend) {
        self.mode = InteractionMode::Hover;
        self.cursor.active_year = Some(year);
        self.legend = legend;
    }

    pub fn hover_cell(&mut self, name: String) {
        self.mode = InteractionMode::Hover;
        self.hovered_cell = Some(name);
    }

    /// Returns to idle, dropping cursor and legend.
    pub fn leave(&mut self) {
        self.mode = InteractionMode::Idle;
        self.cursor = CursorState::default();
        self.legend.clear();
        self.hovered_cell = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState, Legend, LegendEntry, sort_legend};
    use crate::render::Color;

    fn entry(name: &str, anchor: f64) -> LegendEntry {
        LegendEntry {
            name: name.to_owned(),
            value: anchor,
            anchor,
            color: Color::WHITE,
        }
    }

    #[test]
    fn legend_sorts_descending_and_keeps_ties_stable() {
        let mut legend: Legend = [entry("a", 1.0), entry("b", 5.0), entry("c", 1.0)]
            .into_iter()
            .collect();
        sort_legend(&mut legend);
        let names: Vec<&str> = legend.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn leaving_resets_cursor() {
        let mut state = InteractionState::default();
        state.hover_year(2020, Legend::new());
        assert!(state.is_hovering());
        state.leave();
        assert_eq!(state.mode, InteractionMode::Idle);
        assert_eq!(state.active_year(), None);
    }
}

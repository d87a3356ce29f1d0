use serde::{Deserialize, Serialize};

/// Gap kept between an overlay box and its anchor or the window edge.
pub const OVERLAY_PADDING: f64 = 20.0;

/// Where a tooltip sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Centered above the anchor.
    #[default]
    Top,
    /// To the right of the anchor, top-aligned.
    Right,
}

/// Floating HTML target driven by the chart (tooltip or popup).
///
/// Coordinates are page pixels. Hosts own the actual element; clamping to
/// the visible window is part of the surface's contract.
pub trait OverlaySurface {
    fn update(&mut self, html: &str, left: f64, top: f64, orientation: Option<Orientation>);

    fn hide(&mut self);
}

/// Placement rule applied by an [`OverlayState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Tooltip,
    Popup,
}

/// Computes the tooltip's top-left corner for an anchor point.
///
/// `Top` centers the box above the anchor, `Right` places it beside the
/// anchor. A box overflowing the window width is shifted left, one
/// overflowing the window height is shifted up.
#[must_use]
pub fn place_tooltip(
    anchor: (f64, f64),
    orientation: Orientation,
    box_size: (f64, f64),
    window_size: (f64, f64),
    padding: f64,
) -> (f64, f64) {
    let (left, top) = anchor;
    let (box_width, box_height) = box_size;
    let (window_width, window_height) = window_size;

    let left_shift = if left + box_width + padding > window_width {
        match orientation {
            Orientation::Top => -(left + box_width - window_width - padding),
            Orientation::Right => -box_width - padding,
        }
    } else {
        0.0
    };
    let top_shift = if top + box_height > window_height {
        -(top + box_height - window_height)
    } else {
        0.0
    };
    let (left_offset, top_offset) = match orientation {
        Orientation::Top => (-box_width / 2.0 + padding, -box_height - padding),
        Orientation::Right => (padding, 0.0),
    };

    (left + left_offset + left_shift, top + top_offset + top_shift)
}

/// Computes the popup's top-left corner: centered above the anchor.
#[must_use]
pub fn place_popup(anchor: (f64, f64), box_size: (f64, f64), padding: f64) -> (f64, f64) {
    let (left, top) = anchor;
    let (box_width, box_height) = box_size;
    (left - box_width / 2.0 + padding, top - box_height - padding)
}

/// In-memory overlay surface.
///
/// Records the last content, anchor and visibility, and resolves the
/// on-page position from the measured box size and the window size. The
/// host feeds both sizes in; they default to an unbounded window and an
/// empty box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayState {
    pub kind: OverlayKind,
    pub padding: f64,
    pub box_size: (f64, f64),
    pub window_size: (f64, f64),
    pub html: String,
    pub anchor: (f64, f64),
    pub orientation: Option<Orientation>,
    pub visible: bool,
    pub updates: usize,
}

impl OverlayState {
    #[must_use]
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            kind,
            padding: OVERLAY_PADDING,
            box_size: (0.0, 0.0),
            window_size: (f64::MAX, f64::MAX),
            html: String::new(),
            anchor: (0.0, 0.0),
            orientation: None,
            visible: false,
            updates: 0,
        }
    }

    #[must_use]
    pub fn tooltip() -> Self {
        Self::new(OverlayKind::Tooltip)
    }

    #[must_use]
    pub fn popup() -> Self {
        Self::new(OverlayKind::Popup)
    }

    #[must_use]
    pub fn with_box_size(mut self, width: f64, height: f64) -> Self {
        self.box_size = (width, height);
        self
    }

    #[must_use]
    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Top-left corner of the box on the page, `None` while hidden.
    #[must_use]
    pub fn place(&self) -> Option<(f64, f64)> {
        if !self.visible {
            return None;
        }
        Some(match self.kind {
            OverlayKind::Tooltip => place_tooltip(
                self.anchor,
                self.orientation.unwrap_or_default(),
                self.box_size,
                self.window_size,
                self.padding,
            ),
            OverlayKind::Popup => place_popup(self.anchor, self.box_size, self.padding),
        })
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::tooltip()
    }
}

impl OverlaySurface for OverlayState {
    fn update(&mut self, html: &str, left: f64, top: f64, orientation: Option<Orientation>) {
        html.clone_into(&mut self.html);
        self.anchor = (left, top);
        self.orientation = orientation;
        self.visible = true;
        self.updates += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

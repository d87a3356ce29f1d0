//! Keyed scene graph kept in sync with chart data.
//!
//! Every visual group (curves, treemap cells, axis ticks, cursor dots, ...)
//! is a [`SceneLayer`] of elements keyed by a stable string. Updates go
//! through [`reconcile`]: new keys enter with a fade-in transition, surviving
//! keys retarget their attributes, vanished keys are dropped immediately.

mod animation;
mod element;

pub use animation::{Animated, Interpolate, ease_cubic_in_out};
pub use element::{CircleShape, LineShape, PathShape, RectShape, SceneElement, Shape, TextShape};

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Viewport;
use crate::render::RenderFrame;

/// Per-pass enter/update/exit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Maps keyed data onto keyed elements.
///
/// After the call `existing` holds exactly one element per distinct data key,
/// in data order. `create` runs for keys without an element, `update` for
/// keys that already had one, `remove` for elements whose key is gone. When
/// `data` repeats a key, the last occurrence wins.
pub fn reconcile<K, V, D, C, U, R>(
    existing: &mut IndexMap<K, V>,
    data: impl IntoIterator<Item = (K, D)>,
    mut create: C,
    mut update: U,
    mut remove: R,
) -> ReconcileStats
where
    K: Hash + Eq,
    C: FnMut(&K, D) -> V,
    U: FnMut(&K, &mut V, D),
    R: FnMut(&K, V),
{
    let mut stats = ReconcileStats::default();
    let mut next: IndexMap<K, V> = IndexMap::with_capacity(existing.len());

    for (key, datum) in data {
        if let Some(mut element) = existing.shift_remove(&key) {
            update(&key, &mut element, datum);
            stats.updated += 1;
            next.insert(key, element);
        } else if let Some(element) = next.get_mut(&key) {
            update(&key, element, datum);
        } else {
            let element = create(&key, datum);
            stats.entered += 1;
            next.insert(key, element);
        }
    }

    for (key, element) in existing.drain(..) {
        remove(&key, element);
        stats.exited += 1;
    }
    *existing = next;
    stats
}

/// Visual groups in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneLayerKind {
    XAxis,
    YAxis,
    Projection,
    Curves,
    Cells,
    CellLabels,
    Guide,
    Cursor,
    CursorDots,
}

impl SceneLayerKind {
    pub const ALL: [Self; 9] = [
        Self::XAxis,
        Self::YAxis,
        Self::Projection,
        Self::Curves,
        Self::Cells,
        Self::CellLabels,
        Self::Guide,
        Self::Cursor,
        Self::CursorDots,
    ];
}

/// Keyed elements drawn relative to `origin`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneLayer {
    pub origin: (f64, f64),
    pub elements: IndexMap<String, SceneElement>,
}

impl SceneLayer {
    #[must_use]
    pub fn new(origin: (f64, f64)) -> Self {
        Self {
            origin,
            elements: IndexMap::new(),
        }
    }

    /// Reconciles the layer against `shapes`, animating over `duration_ms`.
    pub fn sync(
        &mut self,
        shapes: impl IntoIterator<Item = (String, Shape)>,
        now_ms: f64,
        duration_ms: f64,
    ) -> ReconcileStats {
        reconcile(
            &mut self.elements,
            shapes,
            |_, shape| SceneElement::entering(shape, now_ms, duration_ms),
            |_, element, shape| element.shape.retarget(shape, now_ms, duration_ms),
            |key, _| trace!(key = %key, "scene element removed"),
        )
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.elements.len();
        self.elements.clear();
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SceneElement> {
        self.elements.get(key)
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.elements
            .values()
            .any(|element| element.shape.is_animating(now_ms))
    }
}

/// All layers of one chart plus the animation clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    now_ms: f64,
    layers: IndexMap<SceneLayerKind, SceneLayer>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let layers = SceneLayerKind::ALL
            .into_iter()
            .map(|kind| (kind, SceneLayer::default()))
            .collect();
        Self {
            now_ms: 0.0,
            layers,
        }
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advances the clock; negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.now_ms += delta_ms;
        }
    }

    #[must_use]
    pub fn layer(&self, kind: SceneLayerKind) -> Option<&SceneLayer> {
        self.layers.get(&kind)
    }

    /// Element count of one layer.
    #[must_use]
    pub fn layer_len(&self, kind: SceneLayerKind) -> usize {
        self.layer(kind).map_or(0, SceneLayer::len)
    }

    pub fn layer_mut(&mut self, kind: SceneLayerKind) -> &mut SceneLayer {
        self.layers.entry(kind).or_default()
    }

    /// Reconciles one layer at the current clock time.
    pub fn sync_layer(
        &mut self,
        kind: SceneLayerKind,
        shapes: impl IntoIterator<Item = (String, Shape)>,
        duration_ms: f64,
    ) -> ReconcileStats {
        let now_ms = self.now_ms;
        let stats = self.layer_mut(kind).sync(shapes, now_ms, duration_ms);
        trace!(
            layer = ?kind,
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "layer reconciled"
        );
        stats
    }

    pub fn clear_layer(&mut self, kind: SceneLayerKind) -> usize {
        self.layer_mut(kind).clear()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.layers
            .values()
            .any(|layer| layer.is_animating(self.now_ms))
    }

    /// Samples every element at the current clock time.
    #[must_use]
    pub fn frame(&self, viewport: Viewport, opacity: f64) -> RenderFrame {
        self.frame_at(viewport, opacity, self.now_ms)
    }

    /// Samples every element at its transition target.
    #[must_use]
    pub fn settled_frame(&self, viewport: Viewport, opacity: f64) -> RenderFrame {
        self.frame_at(viewport, opacity, f64::INFINITY)
    }

    fn frame_at(&self, viewport: Viewport, opacity: f64, now_ms: f64) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport).with_opacity(opacity);
        for layer in self.layers.values() {
            for element in layer.elements.values() {
                element.current(now_ms).emit(&mut frame, layer.origin);
            }
        }
        frame
    }
}

//! Time-based attribute transitions.
//!
//! An [`Animated`] value blends from a start state to a target state over a
//! fixed duration on the chart clock. Retargeting mid-flight restarts the
//! blend from the value currently on screen, so the newest target always
//! wins and nothing is queued.

use serde::{Deserialize, Serialize};

use crate::core::Path;
use crate::render::Color;

/// Cubic in-out easing over normalized progress.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Values that can be blended between two states.
pub trait Interpolate: Clone + PartialEq {
    /// Returns the state `t` of the way from `self` to `to`.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.lerp(*to, t)
    }
}

impl Interpolate for Path {
    /// Incompatible paths jump straight to the target.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.try_interpolate(to, t).unwrap_or_else(|| to.clone())
    }
}

impl<T: Interpolate> Interpolate for Option<T> {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Some(from), Some(target)) => Some(from.interpolate(target, t)),
            _ => to.clone(),
        }
    }
}

/// One animated attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animated<T> {
    from: T,
    to: T,
    start_ms: f64,
    duration_ms: f64,
}

impl<T: Interpolate> Animated<T> {
    /// A value already at rest.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    /// A transition from `from` to `to` starting at `now_ms`.
    #[must_use]
    pub fn transition(from: T, to: T, now_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms: now_ms,
            duration_ms: duration_ms.max(0.0),
        }
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.to
    }

    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        now_ms < self.end_ms() && self.from != self.to
    }

    /// Value on screen at `now_ms`; exactly the target once the transition
    /// has ended.
    #[must_use]
    pub fn current(&self, now_ms: f64) -> T {
        if self.duration_ms <= 0.0 || now_ms >= self.end_ms() {
            return self.to.clone();
        }
        if now_ms <= self.start_ms {
            return self.from.clone();
        }
        let progress = (now_ms - self.start_ms) / self.duration_ms;
        self.from.interpolate(&self.to, ease_cubic_in_out(progress))
    }

    /// Points the transition at a new target, starting from the value
    /// currently on screen. Re-issuing the current target is a no-op.
    pub fn retarget(&mut self, to: T, now_ms: f64, duration_ms: f64) {
        if to == self.to {
            return;
        }
        self.from = self.current(now_ms);
        self.to = to;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::{Animated, ease_cubic_in_out};

    #[test]
    fn easing_is_symmetric_and_pinned_at_ends() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        let a = ease_cubic_in_out(0.25);
        let b = ease_cubic_in_out(0.75);
        assert!((a + b - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn retarget_restarts_from_value_on_screen() {
        let mut value = Animated::transition(0.0, 100.0, 0.0, 500.0);
        assert_eq!(value.current(250.0), 50.0);
        value.retarget(0.0, 250.0, 500.0);
        assert_eq!(value.current(250.0), 50.0);
        assert_eq!(value.current(750.0), 0.0);
        assert!(!value.is_animating(750.0));
    }

    #[test]
    fn same_target_does_not_restart() {
        let mut value = Animated::transition(0.0, 10.0, 0.0, 500.0);
        value.retarget(10.0, 400.0, 500.0);
        assert_eq!(value.end_ms(), 500.0);
    }
}

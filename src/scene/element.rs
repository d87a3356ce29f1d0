use serde::{Deserialize, Serialize};

use crate::core::Path;
use crate::render::{
    CirclePrimitive, ClipRect, Color, LinePrimitive, LineStrokeStyle, PathPrimitive,
    RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};
use crate::scene::animation::{Animated, Interpolate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub path: Path,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Color,
    pub stroke_width: f64,
    pub style: LineStrokeStyle,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub fill: Color,
    pub h_align: TextHAlign,
    pub clip: Option<ClipRect>,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub opacity: f64,
}

/// Backend-independent visual element attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Path(PathShape),
    Rect(RectShape),
    Line(LineShape),
    Text(TextShape),
    Circle(CircleShape),
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from.interpolate(&to, t)
}

impl Interpolate for Shape {
    /// Numeric attributes blend; discrete ones (text, style, clip) and
    /// mismatched kinds take the target value.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Path(a), Self::Path(b)) => Self::Path(PathShape {
                path: a.path.interpolate(&b.path, t),
                fill: a.fill.interpolate(&b.fill, t),
                stroke: a.stroke.interpolate(&b.stroke, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                opacity: lerp(a.opacity, b.opacity, t),
            }),
            (Self::Rect(a), Self::Rect(b)) => Self::Rect(RectShape {
                x: lerp(a.x, b.x, t),
                y: lerp(a.y, b.y, t),
                width: lerp(a.width, b.width, t),
                height: lerp(a.height, b.height, t),
                fill: a.fill.interpolate(&b.fill, t),
                opacity: lerp(a.opacity, b.opacity, t),
            }),
            (Self::Line(a), Self::Line(b)) => Self::Line(LineShape {
                x1: lerp(a.x1, b.x1, t),
                y1: lerp(a.y1, b.y1, t),
                x2: lerp(a.x2, b.x2, t),
                y2: lerp(a.y2, b.y2, t),
                stroke: a.stroke.interpolate(&b.stroke, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                style: b.style,
                opacity: lerp(a.opacity, b.opacity, t),
            }),
            (Self::Text(a), Self::Text(b)) => Self::Text(TextShape {
                text: b.text.clone(),
                x: lerp(a.x, b.x, t),
                y: lerp(a.y, b.y, t),
                font_size_px: lerp(a.font_size_px, b.font_size_px, t),
                fill: a.fill.interpolate(&b.fill, t),
                h_align: b.h_align,
                clip: b.clip,
                opacity: lerp(a.opacity, b.opacity, t),
            }),
            (Self::Circle(a), Self::Circle(b)) => Self::Circle(CircleShape {
                cx: lerp(a.cx, b.cx, t),
                cy: lerp(a.cy, b.cy, t),
                radius: lerp(a.radius, b.radius, t),
                fill: a.fill.interpolate(&b.fill, t),
                opacity: lerp(a.opacity, b.opacity, t),
            }),
            _ => to.clone(),
        }
    }
}

impl Shape {
    #[must_use]
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Path(shape) => shape.opacity,
            Self::Rect(shape) => shape.opacity,
            Self::Line(shape) => shape.opacity,
            Self::Text(shape) => shape.opacity,
            Self::Circle(shape) => shape.opacity,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        match &mut self {
            Self::Path(shape) => shape.opacity = opacity,
            Self::Rect(shape) => shape.opacity = opacity,
            Self::Line(shape) => shape.opacity = opacity,
            Self::Text(shape) => shape.opacity = opacity,
            Self::Circle(shape) => shape.opacity = opacity,
        }
        self
    }

    /// State a freshly created element starts from: the target attributes,
    /// fully transparent.
    #[must_use]
    pub fn entering(&self) -> Self {
        self.clone().with_opacity(0.0)
    }

    /// Appends the shape to `frame`, shifted by `origin`. Fully transparent
    /// shapes and empty text are skipped.
    pub fn emit(&self, frame: &mut RenderFrame, origin: (f64, f64)) {
        let opacity = self.opacity().clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        let (dx, dy) = origin;
        match self {
            Self::Path(shape) => {
                if shape.path.is_empty() {
                    return;
                }
                frame.paths.push(PathPrimitive {
                    path: shape.path.translated(dx, dy),
                    fill: shape.fill,
                    stroke: shape.stroke,
                    stroke_width: shape.stroke_width,
                    opacity,
                });
            }
            Self::Rect(shape) => frame.rects.push(RectPrimitive {
                x: shape.x + dx,
                y: shape.y + dy,
                width: shape.width.max(0.0),
                height: shape.height.max(0.0),
                fill: shape.fill,
                opacity,
            }),
            Self::Line(shape) => frame.lines.push(
                LinePrimitive::new(
                    shape.x1 + dx,
                    shape.y1 + dy,
                    shape.x2 + dx,
                    shape.y2 + dy,
                    shape.stroke_width,
                    shape.stroke.with_alpha(shape.stroke.alpha * opacity),
                )
                .with_style(shape.style),
            ),
            Self::Text(shape) => {
                if shape.text.is_empty() {
                    return;
                }
                let clip = shape.clip.map(|clip| ClipRect {
                    x: clip.x + dx,
                    y: clip.y + dy,
                    ..clip
                });
                frame.texts.push(
                    TextPrimitive::new(
                        shape.text.clone(),
                        shape.x + dx,
                        shape.y + dy,
                        shape.font_size_px,
                        shape.fill.with_alpha(shape.fill.alpha * opacity),
                        shape.h_align,
                    )
                    .with_clip(clip),
                );
            }
            Self::Circle(shape) => frame.circles.push(CirclePrimitive {
                cx: shape.cx + dx,
                cy: shape.cy + dy,
                radius: shape.radius.max(0.0),
                fill: shape.fill.with_alpha(shape.fill.alpha * opacity),
            }),
        }
    }
}

/// A keyed, persistent visual element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    pub shape: Animated<Shape>,
}

impl SceneElement {
    /// Creates an element that fades in to `target` over `duration_ms`.
    #[must_use]
    pub fn entering(target: Shape, now_ms: f64, duration_ms: f64) -> Self {
        let shape = if duration_ms > 0.0 {
            Animated::transition(target.entering(), target, now_ms, duration_ms)
        } else {
            Animated::settled(target)
        };
        Self { shape }
    }

    #[must_use]
    pub fn current(&self, now_ms: f64) -> Shape {
        self.shape.current(now_ms)
    }

    #[must_use]
    pub fn target(&self) -> &Shape {
        self.shape.target()
    }
}

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One drawing command in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    fn coordinates(&self) -> &'static [usize] {
        match self {
            Self::MoveTo { .. } | Self::LineTo { .. } => &[0, 1],
            Self::CubicTo { .. } => &[0, 1, 2, 3, 4, 5],
            Self::Close => &[],
        }
    }

    fn values(self) -> [f64; 6] {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => [x, y, 0.0, 0.0, 0.0, 0.0],
            Self::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => [x1, y1, x2, y2, x, y],
            Self::Close => [0.0; 6],
        }
    }

    fn with_values(self, v: [f64; 6]) -> Self {
        match self {
            Self::MoveTo { .. } => Self::MoveTo { x: v[0], y: v[1] },
            Self::LineTo { .. } => Self::LineTo { x: v[0], y: v[1] },
            Self::CubicTo { .. } => Self::CubicTo {
                x1: v[0],
                y1: v[1],
                x2: v[2],
                y2: v[3],
                x: v[4],
                y: v[5],
            },
            Self::Close => Self::Close,
        }
    }

    fn same_kind(self, other: Self) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

/// Deterministic vector path produced by the shape generators.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.commands
            .iter()
            .all(|command| command.values().iter().all(|value| value.is_finite()))
    }

    /// Returns the path shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|command| {
                let mut values = command.values();
                for index in command.coordinates() {
                    values[*index] += if index % 2 == 0 { dx } else { dy };
                }
                command.with_values(values)
            })
            .collect();
        Self { commands }
    }

    /// Blends two structurally identical paths; returns `None` when the
    /// command sequences differ.
    #[must_use]
    pub fn try_interpolate(&self, target: &Self, t: f64) -> Option<Self> {
        if self.commands.len() != target.commands.len() {
            return None;
        }
        let mut commands = Vec::with_capacity(self.commands.len());
        for (from, to) in self.commands.iter().zip(&target.commands) {
            if !from.same_kind(*to) {
                return None;
            }
            let a = from.values();
            let b = to.values();
            let mut blended = [0.0; 6];
            for index in 0..6 {
                blended[index] = a[index] + (b[index] - a[index]) * t;
            }
            commands.push(to.with_values(blended));
        }
        Some(Self { commands })
    }

    /// SVG path data (`M0,1L2,3Z`).
    #[must_use]
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for command in &self.commands {
            // Writing into a String cannot fail.
            let _ = match *command {
                PathCommand::MoveTo { x, y } => write!(data, "M{x},{y}"),
                PathCommand::LineTo { x, y } => write!(data, "L{x},{y}"),
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => write!(data, "C{x1},{y1},{x2},{y2},{x},{y}"),
                PathCommand::Close => write!(data, "Z"),
            };
        }
        data
    }
}

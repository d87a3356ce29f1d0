use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::series::Series;
use crate::core::types::DataPoint;

/// Golden ratio, the target aspect ratio of squarified rows.
pub const SQUARIFY_RATIO: f64 = 1.618_033_988_749_895;

/// Name of the synthetic hierarchy root.
pub const ROOT_NAME: &str = "all";

/// One hierarchy leaf: a series' value at the selected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapLeaf {
    pub name: String,
    pub value: f64,
}

/// Two-level hierarchy `root -> leaves`, leaves sorted by value descending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hierarchy {
    pub leaves: Vec<TreemapLeaf>,
}

impl Hierarchy {
    /// Builds the hierarchy from raw leaves, sorting them by value
    /// descending. Ties keep input order.
    #[must_use]
    pub fn new(mut leaves: Vec<TreemapLeaf>) -> Self {
        leaves.sort_by(|left, right| right.value.total_cmp(&left.value));
        Self { leaves }
    }

    /// Selects each series' sample at `year`. Series without one are
    /// skipped.
    #[must_use]
    pub fn from_series_at_year(series: &[Series<DataPoint>], year: i32) -> Self {
        let leaves: Vec<TreemapLeaf> = series
            .iter()
            .filter_map(|line| match line.point_at_year(year) {
                Some(point) => Some(TreemapLeaf {
                    name: line.name.clone(),
                    value: point.y,
                }),
                None => {
                    warn!(series = %line.name, year, "series has no sample for treemap year");
                    None
                }
            })
            .collect();
        debug!(leaves = leaves.len(), year, "built treemap hierarchy");
        Self::new(leaves)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Root value: the sum of every leaf.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.leaves.iter().map(|leaf| leaf.value).sum()
    }
}

/// Positioned treemap cell in canvas-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapCell {
    pub name: String,
    pub value: f64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl TreemapCell {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Half-open hit test.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }

    /// Labels need the area and both dimensions strictly above `min_size`.
    #[must_use]
    pub fn fits_label(&self, min_size: f64) -> bool {
        self.area() > min_size && self.width() > min_size && self.height() > min_size
    }
}

/// Layout knobs for [`squarify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub round: bool,
}

impl TreemapLayout {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: 1.0,
            round: true,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }
}

/// Lays out the hierarchy leaves with squarified packing.
///
/// The root occupies `[0, width] x [0, height]`. Leaves are tiled inside the
/// root inset by half the padding, then each leaf is inset by another half,
/// so neighbours are `padding` apart and the outer border is `padding` wide.
/// Negative values weigh as zero. Cells are returned in hierarchy order.
#[must_use]
pub fn squarify(hierarchy: &Hierarchy, layout: TreemapLayout) -> Vec<TreemapCell> {
    let weights: Vec<f64> = hierarchy
        .leaves
        .iter()
        .map(|leaf| if leaf.value.is_finite() { leaf.value.max(0.0) } else { 0.0 })
        .collect();

    let half = layout.padding / 2.0;
    let (x0, x1) = inset(0.0, layout.width.max(0.0), half);
    let (y0, y1) = inset(0.0, layout.height.max(0.0), half);

    let rects = squarify_rects(&weights, Rect { x0, y0, x1, y1 });
    hierarchy
        .leaves
        .iter()
        .zip(rects)
        .map(|(leaf, rect)| {
            let (mut x0, mut x1) = inset(rect.x0, rect.x1, half);
            let (mut y0, mut y1) = inset(rect.y0, rect.y1, half);
            if layout.round {
                x0 = x0.round();
                y0 = y0.round();
                x1 = x1.round();
                y1 = y1.round();
            }
            TreemapCell {
                name: leaf.name.clone(),
                value: leaf.value,
                x0,
                y0,
                x1,
                y1,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

fn inset(start: f64, end: f64, amount: f64) -> (f64, f64) {
    let (start, end) = (start + amount, end - amount);
    if end < start {
        let mid = (start + end) / 2.0;
        (mid, mid)
    } else {
        (start, end)
    }
}

fn squarify_rects(weights: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut rects = vec![
        Rect {
            x0: bounds.x0,
            y0: bounds.y0,
            x1: bounds.x0,
            y1: bounds.y0,
        };
        weights.len()
    ];
    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = bounds;
    let mut remaining: f64 = weights.iter().sum();
    let n = weights.len();
    let (mut i0, mut i1) = (0, 0);

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Next non-empty node starts the row.
        let mut sum = weights[i1];
        i1 += 1;
        while sum == 0.0 && i1 < n {
            sum = weights[i1];
            i1 += 1;
        }
        let mut min_value = sum;
        let mut max_value = sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * SQUARIFY_RATIO);
        let mut beta = sum * sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        // Grow the row while the worst aspect ratio does not get worse.
        while i1 < n {
            let value = weights[i1];
            sum += value;
            min_value = min_value.min(value);
            max_value = max_value.max(value);
            beta = sum * sum * alpha;
            let ratio = (max_value / beta).max(beta / min_value);
            if ratio > min_ratio {
                sum -= value;
                break;
            }
            min_ratio = ratio;
            i1 += 1;
        }

        let row = i0..i1;
        if dx < dy {
            let row_y1 = if remaining > 0.0 {
                y0 + dy * sum / remaining
            } else {
                y1
            };
            dice(&weights[row.clone()], &mut rects[row], x0, y0, x1, row_y1, sum);
            if remaining > 0.0 {
                y0 = row_y1;
            }
        } else {
            let row_x1 = if remaining > 0.0 {
                x0 + dx * sum / remaining
            } else {
                x1
            };
            slice(&weights[row.clone()], &mut rects[row], x0, y0, row_x1, y1, sum);
            if remaining > 0.0 {
                x0 = row_x1;
            }
        }
        remaining -= sum;
        i0 = i1;
    }
    rects
}

/// Splits a row horizontally: every node spans the full row height.
fn dice(weights: &[f64], out: &mut [Rect], x0: f64, y0: f64, x1: f64, y1: f64, total: f64) {
    let k = if total > 0.0 { (x1 - x0) / total } else { 0.0 };
    let mut x = x0;
    for (weight, rect) in weights.iter().zip(out.iter_mut()) {
        let next = x + weight * k;
        *rect = Rect {
            x0: x,
            y0,
            x1: next,
            y1,
        };
        x = next;
    }
}

/// Splits a row vertically: every node spans the full row width.
fn slice(weights: &[f64], out: &mut [Rect], x0: f64, y0: f64, x1: f64, y1: f64, total: f64) {
    let k = if total > 0.0 { (y1 - y0) / total } else { 0.0 };
    let mut y = y0;
    for (weight, rect) in weights.iter().zip(out.iter_mut()) {
        let next = y + weight * k;
        *rect = Rect {
            x0,
            y0: y,
            x1,
            y1: next,
        };
        y = next;
    }
}

#[cfg(test)]
mod tests {
    use super::{Hierarchy, TreemapLayout, TreemapLeaf, squarify};

    fn leaf(name: &str, value: f64) -> TreemapLeaf {
        TreemapLeaf {
            name: name.to_owned(),
            value,
        }
    }

    #[test]
    fn leaves_are_sorted_by_value_descending() {
        let hierarchy = Hierarchy::new(vec![leaf("a", 1.0), leaf("b", 5.0), leaf("c", 3.0)]);
        let names: Vec<&str> = hierarchy.leaves.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(hierarchy.value(), 9.0);
    }

    #[test]
    fn single_leaf_fills_the_padded_canvas() {
        let hierarchy = Hierarchy::new(vec![leaf("only", 4.0)]);
        let cells = squarify(&hierarchy, TreemapLayout::new(100.0, 60.0));
        assert_eq!(cells.len(), 1);
        assert_eq!((cells[0].x0, cells[0].y0), (1.0, 1.0));
        assert_eq!((cells[0].x1, cells[0].y1), (99.0, 59.0));
    }

    #[test]
    fn two_equal_leaves_split_a_wide_canvas_side_by_side() {
        let hierarchy = Hierarchy::new(vec![leaf("a", 1.0), leaf("b", 1.0)]);
        let cells = squarify(&hierarchy, TreemapLayout::new(200.0, 100.0).with_round(false));
        assert_eq!((cells[0].x0, cells[0].x1), (1.0, 99.5));
        assert_eq!((cells[1].x0, cells[1].x1), (100.5, 199.0));
        assert_eq!((cells[0].y0, cells[0].y1), (1.0, 99.0));
    }

    #[test]
    fn zero_and_negative_values_collapse_to_empty_cells() {
        let hierarchy = Hierarchy::new(vec![leaf("a", 3.0), leaf("z", 0.0), leaf("n", -2.0)]);
        let cells = squarify(&hierarchy, TreemapLayout::new(100.0, 100.0));
        assert_eq!(cells.len(), 3);
        assert!(cells[0].area() > 0.0);
        assert!(cells[1].area() <= 0.0);
        assert!(cells[2].area() <= 0.0);
    }

    #[test]
    fn label_threshold_requires_both_dimensions() {
        let hierarchy = Hierarchy::new(vec![leaf("a", 1.0)]);
        let cells = squarify(&hierarchy, TreemapLayout::new(300.0, 40.0));
        assert!(!cells[0].fits_label(50.0));
        let cells = squarify(&hierarchy, TreemapLayout::new(300.0, 300.0));
        assert!(cells[0].fits_label(50.0));
    }
}

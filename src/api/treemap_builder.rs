use crate::core::{Hierarchy, TreemapCell, TreemapLayout, format_si_with_precision, squarify};
use crate::render::{ClipRect, TextHAlign};
use crate::scene::{RectShape, Shape, TextShape};

use super::{ChartConfig, ChartStyle};

/// Packs the hierarchy into the plot area with the configured padding and
/// pixel rounding.
#[must_use]
pub fn layout_cells(config: &ChartConfig, hierarchy: &Hierarchy) -> Vec<TreemapCell> {
    let layout =
        TreemapLayout::new(config.width, config.height).with_padding(config.style.treemap_padding);
    squarify(hierarchy, layout)
}

/// One filled rectangle per leaf, keyed by leaf name and colored by leaf
/// order.
#[must_use]
pub fn cell_shapes(style: &ChartStyle, cells: &[TreemapCell]) -> Vec<(String, Shape)> {
    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            (
                cell.name.clone(),
                Shape::Rect(RectShape {
                    x: cell.x0,
                    y: cell.y0,
                    width: cell.width(),
                    height: cell.height(),
                    fill: style.series_color(index),
                    opacity: 1.0,
                }),
            )
        })
        .collect()
}

/// Two-line labels (name, formatted value) for cells large enough to hold
/// them, clipped to their cell.
#[must_use]
pub fn label_shapes(style: &ChartStyle, cells: &[TreemapCell]) -> Vec<(String, Shape)> {
    let mut shapes = Vec::new();
    for cell in cells
        .iter()
        .filter(|cell| cell.fits_label(style.treemap_label_min_size))
    {
        let clip = ClipRect {
            x: cell.x0,
            y: cell.y0,
            width: cell.width(),
            height: cell.height(),
        };
        let lines = [
            ("name", cell.name.clone()),
            (
                "value",
                format_si_with_precision(cell.value, style.value_precision),
            ),
        ];
        for (line, (suffix, text)) in lines.into_iter().enumerate() {
            shapes.push((
                format!("{}/{suffix}", cell.name),
                Shape::Text(TextShape {
                    text,
                    x: cell.x0,
                    y: cell.y0 + style.treemap_label_line_height * (line + 1) as f64,
                    font_size_px: style.treemap_label_font_size_px,
                    fill: style.treemap_label_color,
                    h_align: TextHAlign::Left,
                    clip: Some(clip),
                    opacity: 1.0,
                }),
            ));
        }
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::{label_shapes, layout_cells};
    use crate::api::ChartConfig;
    use crate::core::{ChartType, Hierarchy, TreemapLeaf};

    fn leaf(name: &str, value: f64) -> TreemapLeaf {
        TreemapLeaf {
            name: name.to_owned(),
            value,
        }
    }

    #[test]
    fn tiny_cells_are_left_unlabelled() {
        let config = ChartConfig::new(ChartType::Treemap, 300.0, 200.0);
        let hierarchy = Hierarchy::new(vec![leaf("big", 1000.0), leaf("tiny", 1.0)]);
        let cells = layout_cells(&config, &hierarchy);
        let keys: Vec<String> = label_shapes(&config.style, &cells)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["big/name", "big/value"]);
    }
}

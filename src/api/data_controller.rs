use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    ChartType, DataPoint, Dataset, Hierarchy, Series, StackedPoint, ViewWindow, series_in_window,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{Chart, OverlaySurface};

/// Per-update view of the dataset, derived from the active window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum FilteredDataset {
    Lines(Vec<Series<DataPoint>>),
    Stacked(Vec<Series<StackedPoint>>),
    Treemap(Hierarchy),
}

impl Default for FilteredDataset {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl FilteredDataset {
    /// Number of series (or treemap leaves).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Lines(series) => series.len(),
            Self::Stacked(series) => series.len(),
            Self::Treemap(hierarchy) => hierarchy.leaves.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total sample count across series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            Self::Lines(series) => series.iter().map(|s| s.values.len()).sum(),
            Self::Stacked(series) => series.iter().map(|s| s.values.len()).sum(),
            Self::Treemap(hierarchy) => hierarchy.leaves.len(),
        }
    }

    #[must_use]
    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        match self {
            Self::Treemap(hierarchy) => Some(hierarchy),
            _ => None,
        }
    }
}

/// Brings a loader dataset into the shape `chart_type` draws.
///
/// Every dataset is re-validated first, so variants built directly get the
/// same checks as [`Dataset::lines`]. Area charts stack plain series
/// bottom-up in input order. Line and treemap charts need raw values and
/// reject pre-stacked input.
pub fn normalize_dataset(chart_type: ChartType, dataset: Dataset) -> ChartResult<Dataset> {
    match (chart_type, dataset.validated()?) {
        (ChartType::Area, Dataset::Lines(series)) => Dataset::stack(series),
        (ChartType::Line | ChartType::Treemap, Dataset::Stacked(_)) => {
            Err(ChartError::InvalidData(format!(
                "{chart_type} chart expects raw series, got a stacked dataset"
            )))
        }
        (_, dataset) => Ok(dataset),
    }
}

/// Narrows `dataset` to `window`.
///
/// Range windows keep every series (possibly emptied) with the samples
/// whose time falls inside the window. A treemap picks each series'
/// sample at the window year and builds the hierarchy from them.
#[must_use]
pub fn filter_dataset(
    chart_type: ChartType,
    dataset: &Dataset,
    window: ViewWindow,
) -> FilteredDataset {
    if chart_type == ChartType::Treemap {
        let (year, _) = window.bounds();
        let hierarchy = match dataset {
            Dataset::Lines(series) => Hierarchy::from_series_at_year(series, year),
            Dataset::Stacked(series) => {
                let contributions: Vec<Series<DataPoint>> = series
                    .iter()
                    .map(|line| Series {
                        name: line.name.clone(),
                        values: line
                            .values
                            .iter()
                            .map(|point| DataPoint::new(point.x, point.value()))
                            .collect(),
                    })
                    .collect();
                Hierarchy::from_series_at_year(&contributions, year)
            }
        };
        return FilteredDataset::Treemap(hierarchy);
    }

    match dataset {
        Dataset::Lines(series) => FilteredDataset::Lines(series_in_window(series, window)),
        Dataset::Stacked(series) => FilteredDataset::Stacked(series_in_window(series, window)),
    }
}

impl<R: Renderer, S: OverlaySurface> Chart<R, S> {
    /// Replaces the dataset without redrawing.
    ///
    /// The slider is rebound to the new observed year range and the
    /// filtered view recomputed; callers follow up with
    /// [`Chart::update_plot`].
    pub fn update_data(&mut self, dataset: Dataset) -> ChartResult<()> {
        let dataset = normalize_dataset(self.config.chart_type, dataset)?;
        if let Some((min_year, max_year)) = dataset.observed_year_range() {
            self.slider.rebind(min_year, max_year);
        }
        debug!(
            series = dataset.len(),
            window = ?self.slider.window(),
            "dataset replaced"
        );
        self.dataset = dataset;
        self.filter_data();
        Ok(())
    }

    /// Recomputes the filtered view from the dataset and current window.
    pub fn filter_data(&mut self) {
        self.filtered = filter_dataset(self.config.chart_type, &self.dataset, self.slider.window());
        debug!(
            series = self.filtered.len(),
            points = self.filtered.point_count(),
            "filtered dataset"
        );
    }

    /// Moves the line/area window and redraws.
    pub fn set_window(&mut self, min_year: i32, max_year: i32) -> ChartResult<()> {
        if !self.config.chart_type.has_time_axis() {
            return Err(ChartError::InvalidData(
                "treemap charts select a single year; use set_year".to_owned(),
            ));
        }
        self.slider.set_range(min_year, max_year)?;
        self.update_plot()
    }

    /// Moves the treemap year and redraws.
    pub fn set_year(&mut self, year: i32) -> ChartResult<()> {
        if self.config.chart_type.has_time_axis() {
            return Err(ChartError::InvalidData(
                "line and area charts select a year range; use set_window".to_owned(),
            ));
        }
        let window = self.slider.set_year(year);
        if window.bounds().0 != year {
            warn!(requested = year, window = ?window, "treemap year clamped to slider bounds");
        }
        self.update_plot()
    }
}

#[cfg(test)]
mod tests {
    use super::{FilteredDataset, filter_dataset, normalize_dataset};
    use crate::core::{ChartType, DataPoint, Dataset, Series, ViewWindow};

    fn lines() -> Dataset {
        Dataset::lines(vec![
            Series::new(
                "A",
                vec![DataPoint::from_year(2010, 5.0), DataPoint::from_year(2020, 10.0)],
            ),
            Series::new("B", vec![DataPoint::from_year(2020, 7.0)]),
        ])
        .expect("dataset")
    }

    #[test]
    fn line_chart_rejects_stacked_input() {
        let stacked = normalize_dataset(ChartType::Area, lines()).expect("stack");
        assert!(stacked.is_stacked());
        assert!(normalize_dataset(ChartType::Line, stacked).is_err());
    }

    #[test]
    fn treemap_filter_skips_series_without_the_year() {
        let filtered = filter_dataset(ChartType::Treemap, &lines(), ViewWindow::year(2010));
        let FilteredDataset::Treemap(hierarchy) = filtered else {
            panic!("expected treemap hierarchy");
        };
        assert_eq!(hierarchy.leaves.len(), 1);
        assert_eq!(hierarchy.leaves[0].name, "A");
    }
}

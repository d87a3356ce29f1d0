use std::collections::{BTreeMap, HashSet};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{DataPoint, StackedPoint, TimePoint};
use crate::error::{ChartError, ChartResult};

/// One named time series. Identity is the name; values are chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<P> {
    pub name: String,
    pub values: Vec<P>,
}

impl<P: TimePoint> Series<P> {
    /// Creates a series with values sorted by time and same-time duplicates
    /// collapsed to the last sample.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<P>) -> Self {
        Self {
            name: name.into(),
            values: canonicalize_values(values),
        }
    }

    /// Returns the sample falling in calendar `year`, if any.
    #[must_use]
    pub fn point_at_year(&self, year: i32) -> Option<&P> {
        self.values.iter().find(|point| point.year() == Some(year))
    }

    #[must_use]
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = self.values.first()?.year()?;
        let last = self.values.last()?.year()?;
        Some((first.min(last), first.max(last)))
    }
}

fn canonicalize_values<P: TimePoint>(mut values: Vec<P>) -> Vec<P> {
    values.sort_by(|left, right| left.time().total_cmp(&right.time()));
    let mut canonical: Vec<P> = Vec::with_capacity(values.len());
    for value in values {
        match canonical.last_mut() {
            Some(last) if last.time() == value.time() => *last = value,
            _ => canonical.push(value),
        }
    }
    canonical
}

/// Dataset handed over by the external loader; replaced wholesale on every
/// category or scenario change.
///
/// Deserialization goes through the same checks as [`Dataset::lines`] and
/// [`Dataset::stacked`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
pub enum Dataset {
    /// Raw `(x, y)` series used by line and treemap charts.
    Lines(Vec<Series<DataPoint>>),
    /// Pre-stacked `(x, y0, y1)` series used by area charts.
    Stacked(Vec<Series<StackedPoint>>),
}

/// Wire shape of [`Dataset`] before validation.
#[derive(Deserialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
enum RawDataset {
    Lines(Vec<Series<DataPoint>>),
    Stacked(Vec<Series<StackedPoint>>),
}

impl TryFrom<RawDataset> for Dataset {
    type Error = ChartError;

    fn try_from(raw: RawDataset) -> ChartResult<Self> {
        match raw {
            RawDataset::Lines(series) => Self::lines(series),
            RawDataset::Stacked(series) => Self::stacked(series),
        }
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDataset::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl Dataset {
    /// Sorts each series chronologically and rejects duplicate names or
    /// non-finite samples.
    pub fn lines(series: Vec<Series<DataPoint>>) -> ChartResult<Self> {
        let series = canonicalize_series(series);
        validate_series(&series)?;
        Ok(Self::Lines(series))
    }

    pub fn stacked(series: Vec<Series<StackedPoint>>) -> ChartResult<Self> {
        let series = canonicalize_series(series);
        validate_series(&series)?;
        Ok(Self::Stacked(series))
    }

    /// Re-runs the constructor checks on a dataset assembled from its
    /// public variants.
    pub fn validated(self) -> ChartResult<Self> {
        match self {
            Self::Lines(series) => Self::lines(series),
            Self::Stacked(series) => Self::stacked(series),
        }
    }

    /// Stacks raw series bottom-up in input order on a zero baseline.
    ///
    /// At every year `y0` of series `i` equals `y1` of the series below it.
    /// A series without a sample for a year contributes nothing to that
    /// year's baseline.
    pub fn stack(series: Vec<Series<DataPoint>>) -> ChartResult<Self> {
        let series = canonicalize_series(series);
        validate_series(&series)?;
        let mut running: BTreeMap<OrderedFloat<f64>, f64> = BTreeMap::new();
        let stacked: Vec<Series<StackedPoint>> = series
            .into_iter()
            .map(|line| {
                let values = line
                    .values
                    .iter()
                    .map(|point| {
                        let baseline = running.entry(OrderedFloat(point.x)).or_insert(0.0);
                        let y0 = *baseline;
                        let y1 = y0 + point.y;
                        *baseline = y1;
                        StackedPoint::new(point.x, y0, y1)
                    })
                    .collect();
                Series {
                    name: line.name,
                    values,
                }
            })
            .collect();
        debug!(series = stacked.len(), "stacked dataset");
        Ok(Self::Stacked(stacked))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Lines(series) => series.len(),
            Self::Stacked(series) => series.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        matches!(self, Self::Stacked(_))
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Lines(series) => series.iter().map(|s| s.name.as_str()).collect(),
            Self::Stacked(series) => series.iter().map(|s| s.name.as_str()).collect(),
        }
    }

    /// Returns `(min_year, max_year)` over every sample, or `None` when the
    /// dataset holds no samples.
    #[must_use]
    pub fn observed_year_range(&self) -> Option<(i32, i32)> {
        let ranges: Vec<(i32, i32)> = match self {
            Self::Lines(series) => series.iter().filter_map(Series::year_range).collect(),
            Self::Stacked(series) => series.iter().filter_map(Series::year_range).collect(),
        };
        ranges
            .into_iter()
            .reduce(|acc, range| (acc.0.min(range.0), acc.1.max(range.1)))
    }
}

fn canonicalize_series<P: TimePoint>(series: Vec<Series<P>>) -> Vec<Series<P>> {
    series
        .into_iter()
        .map(|line| Series::new(line.name, line.values))
        .collect()
}

fn validate_series<P: TimePoint>(series: &[Series<P>]) -> ChartResult<()> {
    let mut seen = HashSet::with_capacity(series.len());
    for line in series {
        if !seen.insert(line.name.as_str()) {
            return Err(ChartError::InvalidData(format!(
                "duplicate series name `{}`",
                line.name
            )));
        }
        if line.values.iter().any(|point| !point.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` contains non-finite samples",
                line.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Dataset, Series};
    use crate::core::types::DataPoint;

    #[test]
    fn series_values_are_sorted_and_deduplicated() {
        let series = Series::new(
            "solar",
            vec![
                DataPoint::from_year(2030, 3.0),
                DataPoint::from_year(2020, 1.0),
                DataPoint::from_year(2030, 4.0),
            ],
        );
        assert_eq!(series.values.len(), 2);
        assert_eq!(series.values[1].y, 4.0);
        assert_eq!(series.year_range(), Some((2020, 2030)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let a = Series::new("wind", vec![DataPoint::from_year(2020, 1.0)]);
        let result = Dataset::lines(vec![a.clone(), a]);
        assert!(result.is_err());
    }

    #[test]
    fn deserialized_datasets_are_validated_and_sorted() {
        let duplicate = r#"{"kind":"lines","lines":[
            {"name":"A","values":[{"x":0.0,"y":1.0}]},
            {"name":"A","values":[{"x":0.0,"y":2.0}]}
        ]}"#;
        let err = serde_json::from_str::<Dataset>(duplicate).expect_err("duplicate names");
        assert!(err.to_string().contains("duplicate series name"));

        let unsorted = r#"{"kind":"lines","lines":[
            {"name":"A","values":[{"x":20.0,"y":2.0},{"x":10.0,"y":1.0}]}
        ]}"#;
        let Dataset::Lines(series) = serde_json::from_str(unsorted).expect("dataset") else {
            panic!("expected raw lines");
        };
        let xs: Vec<f64> = series[0].values.iter().map(|point| point.x).collect();
        assert_eq!(xs, vec![10.0, 20.0]);
    }

    #[test]
    fn stacking_skips_missing_years_in_baseline() {
        let low = Series::new("low", vec![DataPoint::from_year(2020, 2.0)]);
        let high = Series::new(
            "high",
            vec![
                DataPoint::from_year(2020, 3.0),
                DataPoint::from_year(2021, 5.0),
            ],
        );
        let Dataset::Stacked(stacked) = Dataset::stack(vec![low, high]).expect("stack") else {
            panic!("expected stacked dataset");
        };
        assert_eq!(stacked[1].values[0].y0, 2.0);
        assert_eq!(stacked[1].values[0].y1, 5.0);
        assert_eq!(stacked[1].values[1].y0, 0.0);
        assert_eq!(stacked[1].values[1].y1, 5.0);
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::simulation::SimulationError;

/// A single timestamped sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl TimePoint {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Time-ordered series of samples
///
/// Timestamps are timezone-naive and strictly ascending within one series.
/// Two series never share a sampling grid by assumption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimePoint>", into = "Vec<TimePoint>")]
pub struct Series {
    points: Vec<TimePoint>,
}

impl Series {
    /// Create a series, rejecting out-of-order or duplicate timestamps
    pub fn new(points: Vec<TimePoint>) -> Result<Self, SimulationError> {
        if let Some(index) = points
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(SimulationError::UnorderedSeries { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// Build a series from parallel timestamp and value sequences
    pub fn from_parallel(
        timestamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Result<Self, SimulationError> {
        if timestamps.len() != values.len() {
            return Err(SimulationError::ShapeMismatch {
                what: "timestamps/values",
                left: timestamps.len(),
                right: values.len(),
            });
        }
        Self::new(
            timestamps
                .into_iter()
                .zip(values)
                .map(|(t, v)| TimePoint::new(t, v))
                .collect(),
        )
    }

    /// Wrap points without checking order. Only for callers that already
    /// decided to accept a non-monotonic axis.
    pub(crate) fn from_points_unchecked(points: Vec<TimePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TimePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TimePoint> {
        self.points.last()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimePoint> {
        self.points.iter()
    }

    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }
}

impl TryFrom<Vec<TimePoint>> for Series {
    type Error = SimulationError;

    fn try_from(points: Vec<TimePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Series> for Vec<TimePoint> {
    fn from(series: Series) -> Self {
        series.points
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a TimePoint;
    type IntoIter = std::slice::Iter<'a, TimePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Solar forcing samples. Values may hold NaN placeholders until aligned.
pub type IrradianceSeries = Series;

/// Historical observations followed by forecast values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSeries {
    series: Series,
    /// Number of leading samples that came from the historical series
    historical_len: usize,
}

impl MergedSeries {
    pub(crate) fn new(series: Series, historical_len: usize) -> Self {
        Self {
            series,
            historical_len,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn historical_len(&self) -> usize {
        self.historical_len
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Samples taken from the historical series
    pub fn historical(&self) -> &[TimePoint] {
        &self.series.points()[..self.historical_len]
    }

    /// Samples taken from the forecast series
    pub fn forecast(&self) -> &[TimePoint] {
        &self.series.points()[self.historical_len..]
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.series.timestamps()
    }

    pub fn values(&self) -> Vec<f64> {
        self.series.values()
    }
}

/// Simulated indoor temperature, one value per input timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<TimePoint>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn first(&self) -> Option<&TimePoint> {
        self.points.first()
    }

    /// Lowest simulated temperature
    pub fn min(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.value)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Highest simulated temperature
    pub fn max(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.value)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Average over samples (not time-weighted)
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.value).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Temperature at a timestamp using linear interpolation between samples.
    /// Returns `None` outside the simulated range.
    pub fn value_at(&self, timestamp: NaiveDateTime) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if timestamp < first.timestamp || timestamp > last.timestamp {
            return None;
        }

        for pair in self.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if timestamp == a.timestamp {
                return Some(a.value);
            }
            if timestamp > a.timestamp && timestamp <= b.timestamp {
                let span = (b.timestamp - a.timestamp).num_milliseconds() as f64;
                if span <= 0.0 {
                    return Some(b.value);
                }
                let weight = (timestamp - a.timestamp).num_milliseconds() as f64 / span;
                return Some(a.value + weight * (b.value - a.value));
            }
        }

        Some(last.value)
    }

    /// Hours spent below `threshold_c`.
    ///
    /// Each step's duration is attributed to the sample it starts from, which is
    /// the same convention the integrator uses for its forcing terms.
    pub fn hours_below(&self, threshold_c: f64) -> f64 {
        self.points
            .windows(2)
            .filter(|w| w[0].value < threshold_c)
            .map(|w| super::hours_between(w[0].timestamp, w[1].timestamp).max(0.0))
            .sum()
    }
}

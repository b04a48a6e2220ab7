//! Series alignment
//!
//! Joins observed history with the forward forecast into one time axis and cuts
//! the irradiance series down to a time window.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::{IrradianceSeries, MergedSeries, Series, TimePoint};
use crate::simulation::SimulationError;

/// What to do when the forecast starts before the history ends
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Fail with `NonMonotonicBoundary`
    #[default]
    Strict,
    /// Concatenate anyway. The merged time axis may go backwards, and the
    /// integrator then sees negative steps.
    Passthrough,
}

/// Concatenate `historical` followed by `forecast` under the strict policy.
pub fn merge(historical: &Series, forecast: &Series) -> Result<MergedSeries, SimulationError> {
    merge_with_policy(historical, forecast, BoundaryPolicy::Strict)
}

/// Concatenate `historical` followed by `forecast`.
///
/// A shared timestamp at the boundary is kept twice. The result always has
/// `historical.len() + forecast.len()` samples and starts with `historical`
/// unchanged.
pub fn merge_with_policy(
    historical: &Series,
    forecast: &Series,
    policy: BoundaryPolicy,
) -> Result<MergedSeries, SimulationError> {
    let (Some(hist_last), hist_len) = (historical.last(), historical.len()) else {
        return Err(SimulationError::InsufficientData {
            required: 1,
            actual: 0,
        });
    };

    if let Some(fc_first) = forecast.first() {
        if policy == BoundaryPolicy::Strict && hist_last.timestamp > fc_first.timestamp {
            return Err(SimulationError::NonMonotonicBoundary {
                historical_end: hist_last.timestamp,
                forecast_start: fc_first.timestamp,
            });
        }
    }

    let mut points: Vec<TimePoint> = Vec::with_capacity(hist_len + forecast.len());
    points.extend_from_slice(historical.points());
    points.extend_from_slice(forecast.points());

    Ok(MergedSeries::new(Series::from_points_unchecked(points), hist_len))
}

/// Samples of `irradiance` with `window_start <= t <= window_end`, NaN replaced by 0.
pub fn align_window(
    irradiance: &IrradianceSeries,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> IrradianceSeries {
    let points = irradiance
        .iter()
        .filter(|p| p.timestamp >= window_start && p.timestamp <= window_end)
        .map(|p| TimePoint::new(p.timestamp, zero_if_nan(p.value)))
        .collect();

    // a filtered subsequence of an ordered series stays ordered
    Series::from_points_unchecked(points)
}

pub(crate) fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

//! Estimation pipeline
//!
//! Composes the stages in the order the presentation layer needs them:
//! merge history with forecast, select the irradiance window, stretch the
//! irradiance to the merged axis, integrate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::{IrradianceSeries, MergedSeries, Series, TimePoint, Trajectory};
use crate::forecast::{align_window, merge_with_policy, BoundaryPolicy};
use crate::simulation::{SimulationError, ThermalIntegrator};

/// Which part of the merged axis irradiance samples are taken from
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
pub enum IrradianceWindow {
    /// Span of the historical observations only; the forecast part is always
    /// extrapolated
    #[default]
    Observed,
    /// Whole merged span, so forecast irradiance is used where available
    Merged,
}

/// Parsed input series for one estimate
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationInputs {
    pub historical: Series,
    pub forecast: Series,
    pub irradiance: IrradianceSeries,
}

/// Outcome of one estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub merged: MergedSeries,
    pub trajectory: Trajectory,
    /// Irradiance samples that fell inside the window
    pub irradiance_observed: usize,
}

impl Estimate {
    pub fn summary(&self, freezing_c: f64) -> EstimateSummary {
        EstimateSummary {
            samples: self.trajectory.len(),
            historical_samples: self.merged.historical_len(),
            forecast_samples: self.merged.len() - self.merged.historical_len(),
            irradiance_observed: self.irradiance_observed,
            min_c: self.trajectory.min(),
            max_c: self.trajectory.max(),
            mean_c: self.trajectory.mean(),
            hours_below_freezing: self.trajectory.hours_below(freezing_c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub samples: usize,
    pub historical_samples: usize,
    pub forecast_samples: usize,
    pub irradiance_observed: usize,
    pub min_c: Option<f64>,
    pub max_c: Option<f64>,
    pub mean_c: Option<f64>,
    pub hours_below_freezing: f64,
}

/// Runs the whole chain with one fixed model configuration
pub struct Estimator {
    integrator: ThermalIntegrator,
    boundary: BoundaryPolicy,
    window: IrradianceWindow,
}

impl Estimator {
    pub fn new(integrator: ThermalIntegrator) -> Self {
        Self {
            integrator,
            boundary: BoundaryPolicy::default(),
            window: IrradianceWindow::default(),
        }
    }

    pub fn with_boundary_policy(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_irradiance_window(mut self, window: IrradianceWindow) -> Self {
        self.window = window;
        self
    }

    pub fn integrator(&self) -> &ThermalIntegrator {
        &self.integrator
    }

    pub fn estimate(&self, inputs: &EstimationInputs) -> Result<Estimate, SimulationError> {
        let merged = merge_with_policy(&inputs.historical, &inputs.forecast, self.boundary)?;

        let (start, end) = self.window_bounds(&merged)?;
        let radiation = align_window(&inputs.irradiance, start, end).values();

        let trajectory = self.integrator.simulate(
            &merged.values(),
            Some(radiation.as_slice()),
            &merged.timestamps(),
        )?;

        Ok(Estimate {
            merged,
            trajectory,
            irradiance_observed: radiation.len(),
        })
    }

    fn window_bounds(
        &self,
        merged: &MergedSeries,
    ) -> Result<(NaiveDateTime, NaiveDateTime), SimulationError> {
        let span = match self.window {
            IrradianceWindow::Observed => merged.historical(),
            IrradianceWindow::Merged => merged.series().points(),
        };
        match (span.first(), span.last()) {
            (Some(first), Some(last)) => Ok((first.timestamp, last.timestamp)),
            _ => Err(SimulationError::InsufficientData {
                required: 1,
                actual: 0,
            }),
        }
    }
}

/// Parallel timestamp/value arrays as delivered by the data layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

/// Like [`SeriesPayload`], with `null` marking a missing reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrradiancePayload {
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<Option<f64>>,
}

/// One estimation request in its serialized form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub historical: SeriesPayload,
    pub forecast: SeriesPayload,
    #[serde(default)]
    pub irradiance: IrradiancePayload,
}

impl TryFrom<EstimationRequest> for EstimationInputs {
    type Error = SimulationError;

    fn try_from(req: EstimationRequest) -> Result<Self, Self::Error> {
        let historical = Series::from_parallel(req.historical.timestamps, req.historical.values)?;
        let forecast = Series::from_parallel(req.forecast.timestamps, req.forecast.values)?;

        let IrradiancePayload { timestamps, values } = req.irradiance;
        if timestamps.len() != values.len() {
            return Err(SimulationError::ShapeMismatch {
                what: "irradiance timestamps/values",
                left: timestamps.len(),
                right: values.len(),
            });
        }
        let irradiance = Series::new(
            timestamps
                .into_iter()
                .zip(values)
                .map(|(t, v)| TimePoint::new(t, v.unwrap_or(f64::NAN)))
                .collect(),
        )?;

        Ok(Self {
            historical,
            forecast,
            irradiance,
        })
    }
}

use chrono::NaiveDateTime;
use itertools::Itertools;

use super::SimulationError;
use crate::domain::{hours_between, ModelParameters, SimulationOptions, TimePoint, Trajectory};
use crate::forecast::{IrradianceExtrapolator, TrailingMeanExtrapolator};

/// Single-node room model integrated with explicit Euler steps
///
/// Physics:
/// - dT/dt = k_wall * (T_air - T) + k_floor * (T_ground - T) + k_solar * G
///
/// The step length is the real elapsed time between consecutive samples, so
/// irregular axes (history/forecast seams, DST, gaps) are integrated exactly as
/// sampled. Results are not clamped to any physical range.
pub struct ThermalIntegrator {
    params: ModelParameters,
    options: SimulationOptions,
    extrapolator: Box<dyn IrradianceExtrapolator>,
}

impl ThermalIntegrator {
    pub fn new(params: ModelParameters, options: SimulationOptions) -> Self {
        Self {
            params,
            options,
            extrapolator: Box::new(TrailingMeanExtrapolator::default()),
        }
    }

    /// Replace the strategy used when radiation is shorter than the air series
    pub fn with_extrapolator(mut self, extrapolator: Box<dyn IrradianceExtrapolator>) -> Self {
        self.extrapolator = extrapolator;
        self
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    pub fn extrapolator_name(&self) -> &'static str {
        self.extrapolator.name()
    }

    /// Integrate the room temperature over `time`.
    ///
    /// # Arguments
    /// * `air` - Outdoor air temperature per sample (°C)
    /// * `radiation` - Solar forcing per sample; stretched to `air.len()` if short,
    ///   treated as zero if `None`
    /// * `time` - Sample timestamps, same length as `air`
    pub fn simulate(
        &self,
        air: &[f64],
        radiation: Option<&[f64]>,
        time: &[NaiveDateTime],
    ) -> Result<Trajectory, SimulationError> {
        if air.len() != time.len() {
            return Err(SimulationError::ShapeMismatch {
                what: "air/time",
                left: air.len(),
                right: time.len(),
            });
        }

        let n = air.len();
        if n < 2 {
            return Err(SimulationError::InsufficientData {
                required: 2,
                actual: n,
            });
        }

        let radiation = match radiation {
            Some(r) => self.extrapolator.extend(r, n),
            None => vec![0.0; n],
        };

        let ModelParameters {
            k_wall,
            k_floor,
            k_solar,
        } = self.params;
        let ground = self.options.ground_temp_c;

        let mut temps = Vec::with_capacity(n);
        temps.push(self.options.initial_temp_c);

        for (i, (&t0, &t1)) in time.iter().tuple_windows().enumerate() {
            let dt_hours = hours_between(t0, t1);
            let current = temps[i];
            let rate = k_wall * (air[i] - current)
                + k_floor * (ground - current)
                + k_solar * radiation[i];
            temps.push(current + dt_hours * rate);
        }

        Ok(Trajectory {
            points: time
                .iter()
                .zip(temps)
                .map(|(&t, v)| TimePoint::new(t, v))
                .collect(),
        })
    }
}

/// Run the model with the default trailing-mean extrapolation.
pub fn simulate(
    params: &ModelParameters,
    air: &[f64],
    radiation: Option<&[f64]>,
    time: &[NaiveDateTime],
    options: &SimulationOptions,
) -> Result<Trajectory, SimulationError> {
    ThermalIntegrator::new(*params, *options).simulate(air, radiation, time)
}

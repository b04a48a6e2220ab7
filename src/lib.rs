//! Room Thermal Estimator
//!
//! Estimates the indoor temperature of an unheated room from outdoor air
//! temperature, ground temperature and solar irradiance.
//!
//! - [`forecast`] merges observed history with the forecast and prepares the
//!   irradiance forcing
//! - [`simulation`] integrates the single-node heat balance
//! - [`freshness`] tells callers when cached upstream data must be refreshed
//! - [`pipeline`] chains the stages for one estimate

pub mod config;
pub mod domain;
pub mod forecast;
pub mod freshness;
pub mod pipeline;
pub mod simulation;
pub mod telemetry;

pub use domain::{ModelParameters, Series, SimulationOptions, TimePoint, Trajectory};
pub use pipeline::{Estimate, EstimationInputs, Estimator};
pub use simulation::{simulate, SimulationError, ThermalIntegrator};

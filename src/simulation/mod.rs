//! # Room Thermal Simulation
//!
//! Lumped-parameter model of a single room exchanging heat with outside air,
//! the ground below the floor and solar input.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use room_thermal_estimator::domain::{ModelParameters, SimulationOptions};
//! use room_thermal_estimator::simulation::simulate;
//!
//! let t0 = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let time = vec![t0, t0 + Duration::hours(1)];
//!
//! let trajectory = simulate(
//!     &ModelParameters::new(1.0, 0.0, 0.0),
//!     &[0.0, 10.0],
//!     None,
//!     &time,
//!     &SimulationOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(trajectory.values(), vec![3.0, 0.0]);
//! ```

pub mod error;
pub mod thermal;

pub use error::SimulationError;
pub use thermal::{simulate, ThermalIntegrator};

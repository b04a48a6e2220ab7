use serde::{Deserialize, Serialize};

/// Heat-transfer coefficients of the lumped room model
///
/// Immutable for one simulation run. Pass a separate value per room or station
/// to simulate several of them side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Exchange with outside air (1/hour)
    pub k_wall: f64,

    /// Exchange with the ground below the floor (1/hour)
    pub k_floor: f64,

    /// Gain per unit of solar irradiance (K/hour per irradiance unit)
    pub k_solar: f64,
}

impl ModelParameters {
    pub fn new(k_wall: f64, k_floor: f64, k_solar: f64) -> Self {
        Self {
            k_wall,
            k_floor,
            k_solar,
        }
    }

    /// Coefficients fitted for the reference room (an unheated bathroom)
    pub fn reference() -> Self {
        Self {
            k_wall: 0.00875756,
            k_floor: 0.0007412,
            k_solar: 0.00011976,
        }
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self::reference()
    }
}

/// Boundary conditions of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Constant soil temperature under the floor (°C)
    pub ground_temp_c: f64,

    /// Seed of the trajectory (°C)
    pub initial_temp_c: f64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            ground_temp_c: 15.0,
            initial_temp_c: 3.0,
        }
    }
}

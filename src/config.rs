use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::{ModelParameters, SimulationOptions};
use crate::forecast::{BoundaryPolicy, ExtrapolationKind, DEFAULT_TRAILING_WINDOW};
use crate::pipeline::{Estimator, IrradianceWindow};
use crate::simulation::ThermalIntegrator;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "RTE__";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    #[validate(nested)]
    pub model: ModelConfig,
    pub alignment: AlignmentConfig,
    #[validate(nested)]
    pub extrapolation: ExtrapolationConfig,
    #[validate(nested)]
    pub freshness: FreshnessConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ModelConfig {
    #[validate(custom(function = "finite"))]
    pub k_wall: f64,
    #[validate(custom(function = "finite"))]
    pub k_floor: f64,
    #[validate(custom(function = "finite"))]
    pub k_solar: f64,
    #[validate(custom(function = "finite"))]
    pub ground_temp_c: f64,
    #[validate(custom(function = "finite"))]
    pub initial_temp_c: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let params = ModelParameters::reference();
        let options = SimulationOptions::default();
        Self {
            k_wall: params.k_wall,
            k_floor: params.k_floor,
            k_solar: params.k_solar,
            ground_temp_c: options.ground_temp_c,
            initial_temp_c: options.initial_temp_c,
        }
    }
}

impl ModelConfig {
    pub fn params(&self) -> ModelParameters {
        ModelParameters::new(self.k_wall, self.k_floor, self.k_solar)
    }

    pub fn options(&self) -> SimulationOptions {
        SimulationOptions {
            ground_temp_c: self.ground_temp_c,
            initial_temp_c: self.initial_temp_c,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    pub boundary_policy: BoundaryPolicy,
    pub irradiance_window: IrradianceWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExtrapolationConfig {
    pub strategy: ExtrapolationKind,
    #[validate(range(min = 1))]
    pub window_samples: usize,
}

impl Default for ExtrapolationConfig {
    fn default() -> Self {
        Self {
            strategy: ExtrapolationKind::default(),
            window_samples: DEFAULT_TRAILING_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FreshnessConfig {
    pub cache_dir: PathBuf,
    #[validate(
        custom(function = "finite"),
        range(exclusive_min = 0.0, max = 8760.0)
    )]
    pub max_age_hours: f64,
    pub resources: Vec<String>,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("."),
            max_age_hours: 6.0,
            resources: vec![
                "cached_forecast.csv".to_string(),
                "cached_values.csv".to_string(),
            ],
        }
    }
}

impl FreshnessConfig {
    pub fn max_age(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.max_age_hours * 3600.0)
            .with_context(|| format!("max_age_hours {} out of range", self.max_age_hours))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Threshold for the "hours below" figure of the summary (°C)
    pub freezing_threshold_c: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            freezing_threshold_c: 0.0,
        }
    }
}

fn finite(value: f64) -> std::result::Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Defaults, overlaid by the TOML file at `path` (if present), overlaid by
    /// `RTE__`-prefixed environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        let cfg: Config = figment
            .extract()
            .with_context(|| format!("invalid configuration (file {})", path.display()))?;
        cfg.validate().context("configuration failed validation")?;
        Ok(cfg)
    }

    pub fn integrator(&self) -> ThermalIntegrator {
        ThermalIntegrator::new(self.model.params(), self.model.options()).with_extrapolator(
            self.extrapolation
                .strategy
                .build(self.extrapolation.window_samples),
        )
    }

    pub fn estimator(&self) -> Estimator {
        Estimator::new(self.integrator())
            .with_boundary_policy(self.alignment.boundary_policy)
            .with_irradiance_window(self.alignment.irradiance_window)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

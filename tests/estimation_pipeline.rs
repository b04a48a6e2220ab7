//! End-to-end estimates over realistic series shapes.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use room_thermal_estimator::config::Config;
use room_thermal_estimator::domain::{ModelParameters, Series, SimulationOptions};
use room_thermal_estimator::forecast::{extend, BoundaryPolicy};
use room_thermal_estimator::pipeline::{
    EstimationInputs, EstimationRequest, Estimator, IrradianceWindow,
};
use room_thermal_estimator::{SimulationError, ThermalIntegrator};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn series(times: &[NaiveDateTime], f: impl Fn(usize) -> f64) -> Series {
    Series::from_parallel(times.to_vec(), (0..times.len()).map(f).collect()).unwrap()
}

fn hours(from: i64, count: i64) -> Vec<NaiveDateTime> {
    (from..from + count)
        .map(|h| start() + Duration::hours(h))
        .collect()
}

/// Straight-line Euler loop used as an independent reference.
fn reference_run(
    params: ModelParameters,
    options: SimulationOptions,
    air: &[f64],
    rad: &[f64],
    time: &[NaiveDateTime],
) -> Vec<f64> {
    let mut out = vec![options.initial_temp_c];
    for n in 0..air.len() - 1 {
        let dt = (time[n + 1] - time[n]).num_seconds() as f64 / 3600.0;
        let t = out[n];
        out.push(
            t + dt
                * (params.k_wall * (air[n] - t)
                    + params.k_floor * (options.ground_temp_c - t)
                    + params.k_solar * rad[n]),
        );
    }
    out
}

#[test]
fn test_ten_days_history_week_forecast() {
    let hist_times = hours(0, 240);
    let fc_times = hours(240, 168);
    let historical = series(&hist_times, |i| -2.0 + 4.0 * ((i % 24) as f64 / 24.0));
    let forecast = series(&fc_times, |i| 1.0 - (i % 24) as f64 / 12.0);
    // sun readings with gaps every 17th hour
    let irradiance = series(&hist_times, |i| {
        if i % 17 == 0 {
            f64::NAN
        } else if (8..16).contains(&(i % 24)) {
            150.0
        } else {
            0.0
        }
    });

    let estimator = Config::default().estimator();
    let inputs = EstimationInputs {
        historical: historical.clone(),
        forecast: forecast.clone(),
        irradiance: irradiance.clone(),
    };
    let estimate = estimator.estimate(&inputs).unwrap();

    assert_eq!(estimate.trajectory.len(), 408);
    assert_eq!(estimate.trajectory.values()[0], 3.0);
    assert_eq!(estimate.irradiance_observed, 240);

    let mut air = historical.values();
    air.extend(forecast.values());
    let mut time = hist_times.clone();
    time.extend(fc_times);
    let rad_observed: Vec<f64> = irradiance
        .values()
        .into_iter()
        .map(|v| if v.is_nan() { 0.0 } else { v })
        .collect();
    let rad = extend(&rad_observed, air.len());

    let expected = reference_run(
        ModelParameters::reference(),
        SimulationOptions::default(),
        &air,
        &rad,
        &time,
    );
    for (got, want) in estimate.trajectory.values().iter().zip(&expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn test_irregular_axis_with_missing_hours() {
    // hourly history, then a 3-hour gap into a 3-hourly forecast
    let mut times = hours(0, 6);
    let fc: Vec<_> = (0..4).map(|i| start() + Duration::hours(8 + 3 * i)).collect();
    times.extend(fc.iter().copied());

    let inputs = EstimationInputs {
        historical: series(&times[..6], |_| -5.0),
        forecast: series(&fc, |_| -5.0),
        irradiance: Series::default(),
    };
    let params = ModelParameters::new(0.05, 0.0, 0.0);
    let options = SimulationOptions::default();
    let estimate = Estimator::new(ThermalIntegrator::new(params, options))
        .estimate(&inputs)
        .unwrap();

    let expected = reference_run(params, options, &[-5.0; 10], &[0.0; 10], &times);
    assert_eq!(estimate.trajectory.values(), expected);
}

#[test]
fn test_overlapping_boundary_policies() {
    let inputs = EstimationInputs {
        historical: series(&hours(0, 5), |_| 0.0),
        forecast: series(&hours(3, 5), |_| 0.0),
        irradiance: Series::default(),
    };

    let strict = Config::default().estimator().estimate(&inputs);
    assert!(matches!(
        strict,
        Err(SimulationError::NonMonotonicBoundary { .. })
    ));

    let legacy = Config::default()
        .estimator()
        .with_boundary_policy(BoundaryPolicy::Passthrough)
        .with_irradiance_window(IrradianceWindow::Merged)
        .estimate(&inputs)
        .unwrap();
    assert_eq!(legacy.trajectory.len(), 10);
}

#[test]
fn test_passthrough_integrates_negative_seam_step() {
    // forecast restarts two hours before the last observation
    let hist_times = hours(0, 5);
    let fc_times = hours(3, 5);
    let inputs = EstimationInputs {
        historical: series(&hist_times, |i| -4.0 + i as f64),
        forecast: series(&fc_times, |i| 2.0 - 0.5 * i as f64),
        irradiance: Series::default(),
    };
    let params = ModelParameters::new(0.1, 0.02, 0.0);
    let options = SimulationOptions::default();

    let estimate = Estimator::new(ThermalIntegrator::new(params, options))
        .with_boundary_policy(BoundaryPolicy::Passthrough)
        .estimate(&inputs)
        .unwrap();

    let mut time = hist_times.clone();
    time.extend(fc_times);
    let mut air = inputs.historical.values();
    air.extend(inputs.forecast.values());
    let expected = reference_run(params, options, &air, &[0.0; 10], &time);

    let got = estimate.trajectory.values();
    assert_eq!(got.len(), expected.len());
    for (got, want) in got.iter().zip(&expected) {
        assert!((got - want).abs() < 1e-12, "{got} != {want}");
    }

    // the seam step runs backwards by one hour and is not corrected
    let t4 = got[4];
    let seam = t4 - (0.1 * (air[4] - t4) + 0.02 * (15.0 - t4));
    assert!((got[5] - seam).abs() < 1e-12);
    assert_eq!(estimate.trajectory.points[5].timestamp, start() + Duration::hours(3));
}

#[test]
fn test_request_document_round_trip() {
    let json = serde_json::json!({
        "historical": {
            "timestamps": ["2025-12-01T00:00:00", "2025-12-01T01:00:00"],
            "values": [0.0, 10.0]
        },
        "forecast": { "timestamps": [], "values": [] }
    });

    let request: EstimationRequest = serde_json::from_value(json).unwrap();
    let inputs = EstimationInputs::try_from(request).unwrap();
    let estimate = Estimator::new(ThermalIntegrator::new(
        ModelParameters::new(1.0, 0.0, 0.0),
        SimulationOptions::default(),
    ))
    .estimate(&inputs)
    .unwrap();

    assert_eq!(estimate.trajectory.values(), vec![3.0, 0.0]);

    let out = serde_json::to_value(&estimate.trajectory).unwrap();
    assert_eq!(out["points"][1]["timestamp"], "2025-12-01T01:00:00");
}

#[test]
fn test_shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
    let cfg = Config::load_from(path).unwrap();
    assert_eq!(cfg, Config::default());
}

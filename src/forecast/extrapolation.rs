//! Irradiance extrapolation
//!
//! Solar forecasts rarely reach as far out as temperature forecasts. When the
//! irradiance series is shorter than the temperature axis, the missing tail is
//! filled by an [`IrradianceExtrapolator`]. The default fills it with the mean
//! of the last three days of hourly samples, a deliberate flat approximation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::aligner::zero_if_nan;

/// Trailing window of the default policy: three days of hourly samples
pub const DEFAULT_TRAILING_WINDOW: usize = 3 * 24;

/// Strategy for stretching an irradiance series to a target length
pub trait IrradianceExtrapolator: Send + Sync {
    /// Return exactly `target_len` values. Implementations copy the observed
    /// prefix (with NaN read as 0) and only decide the values past its end.
    fn extend(&self, irradiance: &[f64], target_len: usize) -> Vec<f64>;

    fn name(&self) -> &'static str;
}

/// Fills the gap with the mean of the trailing `window` samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingMeanExtrapolator {
    pub window: usize,
}

impl TrailingMeanExtrapolator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Default for TrailingMeanExtrapolator {
    fn default() -> Self {
        Self::new(DEFAULT_TRAILING_WINDOW)
    }
}

impl IrradianceExtrapolator for TrailingMeanExtrapolator {
    fn extend(&self, irradiance: &[f64], target_len: usize) -> Vec<f64> {
        let mut out = observed_prefix(irradiance, target_len);
        if out.len() < target_len {
            let fill = trailing_mean(&out, self.window);
            out.resize(target_len, fill);
        }
        out
    }

    fn name(&self) -> &'static str {
        "trailing_mean"
    }
}

/// Assumes no solar forcing past the last observation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroFillExtrapolator;

impl IrradianceExtrapolator for ZeroFillExtrapolator {
    fn extend(&self, irradiance: &[f64], target_len: usize) -> Vec<f64> {
        let mut out = observed_prefix(irradiance, target_len);
        out.resize(target_len, 0.0);
        out
    }

    fn name(&self) -> &'static str {
        "zero_fill"
    }
}

/// Configurable choice of extrapolation strategy
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
pub enum ExtrapolationKind {
    #[default]
    TrailingMean,
    ZeroFill,
}

impl ExtrapolationKind {
    /// Build the strategy. `window` only applies to `TrailingMean`.
    pub fn build(self, window: usize) -> Box<dyn IrradianceExtrapolator> {
        match self {
            Self::TrailingMean => Box::new(TrailingMeanExtrapolator::new(window)),
            Self::ZeroFill => Box::new(ZeroFillExtrapolator),
        }
    }
}

/// Extend with the default trailing-mean policy
pub fn extend(irradiance: &[f64], target_len: usize) -> Vec<f64> {
    TrailingMeanExtrapolator::default().extend(irradiance, target_len)
}

fn observed_prefix(irradiance: &[f64], target_len: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(target_len);
    out.extend(
        irradiance
            .iter()
            .take(target_len)
            .map(|&v| zero_if_nan(v)),
    );
    out
}

/// Mean of the last `window` values, or of all values if fewer. 0 when empty.
fn trailing_mean(values: &[f64], window: usize) -> f64 {
    let tail = &values[values.len().saturating_sub(window)..];
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().sum::<f64>() / tail.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_extend_empty_defaults_to_zero() {
        assert_eq!(extend(&[], 5), vec![0.0; 5]);
    }

    #[test]
    fn test_extend_same_length_is_identity() {
        let s = vec![1.0, 2.0, 3.0];
        assert_eq!(extend(&s, s.len()), s);
    }

    #[test]
    fn test_extend_longer_input_takes_prefix() {
        assert_eq!(extend(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.0, 2.0]);
    }

    #[rstest]
    #[case(vec![2.0, 4.0], 4, vec![2.0, 4.0, 3.0, 3.0])]
    #[case(vec![6.0], 3, vec![6.0, 6.0, 6.0])]
    #[case(vec![f64::NAN, 4.0], 3, vec![0.0, 4.0, 2.0])]
    #[case(vec![f64::NAN], 2, vec![0.0, 0.0])]
    #[case(vec![1.0, 2.0], 0, vec![])]
    fn test_extend_fills_with_trailing_mean(
        #[case] input: Vec<f64>,
        #[case] target: usize,
        #[case] expected: Vec<f64>,
    ) {
        assert_eq!(extend(&input, target), expected);
    }

    #[test]
    fn test_extend_uses_only_last_72_samples() {
        // 24 leading samples of 100 fall outside the window, 72 samples of 1 inside
        let mut input = vec![100.0; 24];
        input.extend(vec![1.0; 72]);

        let out = extend(&input, 100);

        assert_eq!(out.len(), 100);
        assert_eq!(&out[..96], input.as_slice());
        assert!(out[96..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_custom_window() {
        let out = TrailingMeanExtrapolator::new(1).extend(&[5.0, 1.0], 3);
        assert_eq!(out, vec![5.0, 1.0, 1.0]);
    }

    #[test]
    fn test_zero_fill() {
        let out = ZeroFillExtrapolator.extend(&[5.0, f64::NAN], 4);
        assert_eq!(out, vec![5.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_extrapolation_kind_build() {
        assert_eq!(ExtrapolationKind::TrailingMean.build(72).name(), "trailing_mean");
        assert_eq!(ExtrapolationKind::ZeroFill.build(72).name(), "zero_fill");
        assert_eq!(
            ExtrapolationKind::from_str("zero_fill").unwrap(),
            ExtrapolationKind::ZeroFill
        );
    }
}

//! Simulation vs test curve comparison metrics.
//!
//! Both curves are resampled onto a shared time base covering only the range
//! where they overlap, then compared point by point. Peak values are taken
//! from the raw curves.

use serde::{Deserialize, Serialize};

use crate::curve::CurveDataset;
use crate::error::{CurveError, CurveResult};
use crate::numeric::{interp, linspace, round_to};
use crate::units::{Pressure, Time, mpa, ms};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub rmse: f64,
    /// Pearson correlation; `None` when either resampled curve is flat
    pub correlation: Option<f64>,
    pub simulation_peak_pressure: f64,
    pub simulation_peak_time: f64,
    pub test_peak_pressure: f64,
    pub test_peak_time: f64,
    pub peak_pressure_difference: f64,
    pub peak_time_difference: f64,
    /// Peak pressure difference relative to the test peak, 0 when the test peak is not positive
    pub peak_pressure_error_percent: f64,
}

impl ComparisonMetrics {
    /// Simulation peak as `(time, pressure)` quantities.
    pub fn simulation_peak(&self) -> (Time, Pressure) {
        (ms(self.simulation_peak_time), mpa(self.simulation_peak_pressure))
    }

    pub fn test_peak(&self) -> (Time, Pressure) {
        (ms(self.test_peak_time), mpa(self.test_peak_pressure))
    }

    /// Absolute peak differences as `(time, pressure)` quantities.
    pub fn peak_difference(&self) -> (Time, Pressure) {
        (ms(self.peak_time_difference), mpa(self.peak_pressure_difference))
    }
}

/// Two curves resampled onto one time base.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTimebase {
    pub time: Vec<f64>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

pub fn interpolate_to_common_timebase(
    first: &CurveDataset,
    second: &CurveDataset,
) -> CurveResult<CommonTimebase> {
    let (first_min, first_max) = first
        .time_range()
        .ok_or(CurveError::Empty { what: "first curve" })?;
    let (second_min, second_max) = second
        .time_range()
        .ok_or(CurveError::Empty { what: "second curve" })?;

    let start = first_min.max(second_min);
    let end = first_max.min(second_max);
    if start > end {
        return Err(CurveError::NoOverlap { start, end });
    }

    let time = linspace(start, end, first.len().max(second.len()));
    let resample = |curve: &CurveDataset| -> Vec<f64> {
        time.iter()
            .map(|&t| interp(t, curve.time(), curve.pressure()))
            .collect()
    };

    Ok(CommonTimebase {
        first: resample(first),
        second: resample(second),
        time,
    })
}

pub fn rmse(actual: &[f64], predicted: &[f64]) -> CurveResult<f64> {
    check_same_len("rmse", actual, predicted)?;
    if actual.is_empty() {
        return Err(CurveError::Empty { what: "rmse input" });
    }
    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;
    Ok(mse.sqrt())
}

pub fn correlation(x: &[f64], y: &[f64]) -> CurveResult<Option<f64>> {
    check_same_len("correlation", x, y)?;
    if x.is_empty() {
        return Err(CurveError::Empty {
            what: "correlation input",
        });
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return Ok(None);
    }
    Ok(Some((cov / denom).clamp(-1.0, 1.0)))
}

pub fn compare_curves(
    simulation: &CurveDataset,
    test: &CurveDataset,
) -> CurveResult<ComparisonMetrics> {
    let common = interpolate_to_common_timebase(simulation, test)?;

    let rmse = rmse(&common.second, &common.first)?;
    let correlation = correlation(&common.first, &common.second)?;

    let (sim_peak_time, sim_peak_pressure) = simulation.peak().ok_or(CurveError::Empty {
        what: "simulation curve",
    })?;
    let (test_peak_time, test_peak_pressure) =
        test.peak().ok_or(CurveError::Empty { what: "test curve" })?;

    let peak_pressure_difference = (sim_peak_pressure - test_peak_pressure).abs();
    let peak_time_difference = (sim_peak_time - test_peak_time).abs();
    let peak_pressure_error_percent = if test_peak_pressure > 0.0 {
        peak_pressure_difference / test_peak_pressure * 100.0
    } else {
        0.0
    };

    Ok(ComparisonMetrics {
        rmse: round_to(rmse, 4),
        correlation: correlation.map(|c| round_to(c, 4)),
        simulation_peak_pressure: round_to(sim_peak_pressure, 2),
        simulation_peak_time: round_to(sim_peak_time, 2),
        test_peak_pressure: round_to(test_peak_pressure, 2),
        test_peak_time: round_to(test_peak_time, 2),
        peak_pressure_difference: round_to(peak_pressure_difference, 2),
        peak_time_difference: round_to(peak_time_difference, 2),
        peak_pressure_error_percent: round_to(peak_pressure_error_percent, 2),
    })
}

fn check_same_len(what: &'static str, left: &[f64], right: &[f64]) -> CurveResult<()> {
    if left.len() != right.len() {
        return Err(CurveError::SampleMismatch {
            what,
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

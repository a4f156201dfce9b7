//! Time/pressure curve datasets.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// A pressure-over-time curve.
///
/// `time` and `pressure` are index-aligned. The length check runs in
/// [`CurveDataset::new`] and on deserialization, so a mismatched payload from
/// a collaborator is rejected before it can reach a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct CurveDataset {
    time: Vec<f64>,
    pressure: Vec<f64>,
}

#[derive(Deserialize)]
struct RawCurve {
    #[serde(default)]
    time: Vec<f64>,
    #[serde(default)]
    pressure: Vec<f64>,
}

impl TryFrom<RawCurve> for CurveDataset {
    type Error = CurveError;

    fn try_from(raw: RawCurve) -> CurveResult<Self> {
        Self::new(raw.time, raw.pressure)
    }
}

impl CurveDataset {
    pub fn new(time: Vec<f64>, pressure: Vec<f64>) -> CurveResult<Self> {
        if time.len() != pressure.len() {
            return Err(CurveError::LengthMismatch {
                time: time.len(),
                pressure: pressure.len(),
            });
        }
        Ok(Self { time, pressure })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// (time, pressure) pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.pressure.iter().copied())
    }

    /// First maximum pressure sample as (time, pressure). NaN samples are skipped.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points()
            .filter(|(_, p)| !p.is_nan())
            .fold(None, |best: Option<(f64, f64)>, (t, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((t, p)),
            })
    }

    /// Earliest and latest timestamps.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let min = self.time.iter().copied().reduce(f64::min)?;
        let max = self.time.iter().copied().reduce(f64::max)?;
        Some((min, max))
    }
}

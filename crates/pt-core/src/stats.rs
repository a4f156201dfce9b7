//! Display-only statistics reported alongside a simulation run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Fit quality, 0..=1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_squared: Option<f64>,
    /// Peak pressure in MPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_models: Option<u32>,
}

impl SimulationStatistics {
    pub fn r_squared_display(&self) -> String {
        format!("{:.4}", self.r_squared.unwrap_or(1.0))
    }

    pub fn peak_pressure_display(&self) -> String {
        match self.peak_pressure {
            Some(p) => format!("{p:.1}"),
            None => "N/A".to_string(),
        }
    }

    pub fn num_models_display(&self) -> String {
        match self.num_models {
            Some(n) => n.to_string(),
            None => "N/A".to_string(),
        }
    }

    /// Two-line summary shown next to the primary chart.
    pub fn summary_text(&self) -> String {
        format!(
            "Polynomial fit (models: {}, R\u{b2}={})\nPeak pressure: {} MPa",
            self.num_models_display(),
            self.r_squared_display(),
            self.peak_pressure_display()
        )
    }
}

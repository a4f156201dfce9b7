//! Request and payload shapes exchanged with the remote service.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pt_core::{ChartDescription, CurveDataset, SimulationStatistics};

/// Simulation parameters, forwarded as form fields in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput {
    fields: Vec<(String, String)>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, replacing an earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Parse `key=value`. The value may itself contain `=`.
    pub fn parse_pair(pair: &str) -> Option<(String, String)> {
        let (key, value) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut input = FormInput::new();
        for (k, v) in iter {
            input.insert(k, v);
        }
        input
    }
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }
}

/// Successful simulation run body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPayload {
    pub plot_data: ChartDescription,
    #[serde(default)]
    pub statistics: Option<SimulationStatistics>,
}

/// Body of a comparison composition request. Absent curves serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionRequest {
    pub simulation_data: Option<CurveDataset>,
    pub test_data: Option<CurveDataset>,
}

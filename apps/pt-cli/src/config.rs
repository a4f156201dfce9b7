//! CLI configuration file and the composition backend it selects.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use pt_client::{
    ClientConfig, ClientResult, CompositionRequest, CompositionService, HttpClient, LocalComposer,
};
use pt_core::ChartDescription;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionMode {
    /// Ask the remote service to build comparison charts.
    #[default]
    Remote,
    /// Build comparison charts in-process.
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub client: ClientConfig,
    /// Directory receiving one `<view>.json` per drawn view
    pub output_dir: PathBuf,
    pub composition: CompositionMode,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            output_dir: PathBuf::from("charts"),
            composition: CompositionMode::default(),
        }
    }
}

impl CliConfig {
    /// Read `path`, or fall back to defaults when no path was given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Comparison backend chosen by [`CompositionMode`].
pub enum Composer<'a> {
    Remote(&'a HttpClient),
    Local(LocalComposer),
}

impl<'a> Composer<'a> {
    pub fn new(mode: CompositionMode, client: &'a HttpClient) -> Self {
        match mode {
            CompositionMode::Remote => Composer::Remote(client),
            CompositionMode::Local => Composer::Local(LocalComposer),
        }
    }
}

impl CompositionService for Composer<'_> {
    async fn compose(&self, request: &CompositionRequest) -> ClientResult<ChartDescription> {
        match self {
            Composer::Remote(client) => client.compose(request).await,
            Composer::Local(local) => local.compose(request).await,
        }
    }
}

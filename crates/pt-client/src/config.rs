//! Remote service configuration.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{ClientError, ClientResult};

pub const BASE_URL_ENV: &str = "PTFLOW_BASE_URL";
pub const SESSION_COOKIE_ENV: &str = "PTFLOW_SESSION_COOKIE";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_RUN_PATH: &str = "simulation/run";
const DEFAULT_UPLOAD_PATH: &str = "simulation/upload";
const DEFAULT_COMPOSE_PATH: &str = "simulation/generate_comparison_chart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub run_path: String,
    pub upload_path: String,
    pub compose_path: String,
    pub user_agent: String,
    /// Sent as the `Cookie` header; the service routes sit behind a login.
    pub session_cookie: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            run_path: DEFAULT_RUN_PATH.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            compose_path: DEFAULT_COMPOSE_PATH.to_string(),
            user_agent: format!("ptflow/{}", env!("CARGO_PKG_VERSION")),
            session_cookie: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn run_url(&self) -> ClientResult<Url> {
        self.endpoint(&self.run_path)
    }

    pub fn upload_url(&self) -> ClientResult<Url> {
        self.endpoint(&self.upload_path)
    }

    pub fn compose_url(&self) -> ClientResult<Url> {
        self.endpoint(&self.compose_path)
    }

    /// Resolve `path` below `base_url`, keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|url| url.join(path.trim_start_matches('/')))
            .map_err(|e| ClientError::Config(format!("{}: {e}", self.base_url)))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        config.session_cookie = std::env::var(SESSION_COOKIE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        config
    }
}

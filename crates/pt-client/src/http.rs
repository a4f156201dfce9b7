//! reqwest-backed implementation of the collaborator traits.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

use pt_core::{ChartDescription, CurveDataset};

use crate::config::ClientConfig;
use crate::envelope;
use crate::wire::{CompositionRequest, FormInput, SimulationPayload, UploadFile};
use crate::{ClientError, ClientResult, CompositionService, ComputeService, IngestionService};

#[derive(Clone)]
pub struct HttpClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(cookie) = &config.session_cookie {
            let mut headers = HeaderMap::new();
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ClientError::Config(format!("session cookie: {e}")))?;
            headers.insert(COOKIE, value);
            builder = builder.default_headers(headers);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send<T: DeserializeOwned>(
        &self,
        what: &'static str,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(what, status, bytes = body.len(), "response received");
        envelope::decode(status, &body)
    }
}

impl ComputeService for HttpClient {
    async fn run_simulation(&self, params: &FormInput) -> ClientResult<SimulationPayload> {
        let url = self.config.run_url()?;
        debug!(%url, fields = params.len(), "submitting simulation");
        self.send("run", self.http.post(url).form(params)).await
    }
}

impl IngestionService for HttpClient {
    async fn upload_test_file(&self, file: &UploadFile) -> ClientResult<CurveDataset> {
        let url = self.config.upload_url()?;
        debug!(%url, file = %file.file_name, bytes = file.bytes.len(), "uploading test file");
        let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        let form = Form::new().part("file", part);
        self.send("upload", self.http.post(url).multipart(form)).await
    }
}

impl CompositionService for HttpClient {
    async fn compose(&self, request: &CompositionRequest) -> ClientResult<ChartDescription> {
        let url = self.config.compose_url()?;
        debug!(
            %url,
            simulation = request.simulation_data.is_some(),
            test = request.test_data.is_some(),
            "requesting comparison chart"
        );
        self.send("compose", self.http.post(url).json(request)).await
    }
}

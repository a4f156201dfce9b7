//! pt-client: collaborator contracts for the ptflow workflow.
//!
//! The workflow never talks to a transport directly. It is handed values
//! implementing [`ComputeService`], [`IngestionService`] and
//! [`CompositionService`]; [`HttpClient`] implements all three against the
//! remote service and [`LocalComposer`] builds comparison charts in-process.

pub mod config;
pub mod envelope;
pub mod http;
pub mod local;
pub mod wire;

pub use config::ClientConfig;
pub use http::HttpClient;
pub use local::LocalComposer;
pub use wire::{CompositionRequest, FormInput, SimulationPayload, UploadFile};

use pt_core::{ChartDescription, CurveDataset};

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("Malformed response: {message}")]
    Malformed { message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Runs a simulation from form parameters.
#[allow(async_fn_in_trait)]
pub trait ComputeService {
    async fn run_simulation(&self, params: &FormInput) -> ClientResult<SimulationPayload>;
}

/// Parses an uploaded test file into a curve.
#[allow(async_fn_in_trait)]
pub trait IngestionService {
    async fn upload_test_file(&self, file: &UploadFile) -> ClientResult<CurveDataset>;
}

/// Builds a comparison chart from two optional curves.
#[allow(async_fn_in_trait)]
pub trait CompositionService {
    async fn compose(&self, request: &CompositionRequest) -> ClientResult<ChartDescription>;
}

impl<T: ComputeService + ?Sized> ComputeService for &T {
    async fn run_simulation(&self, params: &FormInput) -> ClientResult<SimulationPayload> {
        (**self).run_simulation(params).await
    }
}

impl<T: IngestionService + ?Sized> IngestionService for &T {
    async fn upload_test_file(&self, file: &UploadFile) -> ClientResult<CurveDataset> {
        (**self).upload_test_file(file).await
    }
}

impl<T: CompositionService + ?Sized> CompositionService for &T {
    async fn compose(&self, request: &CompositionRequest) -> ClientResult<ChartDescription> {
        (**self).compose(request).await
    }
}

//! Error types for the workflow layer.

use pt_client::ClientError;

use crate::state::ActionKind;

/// Why a workflow action ended without applying its result.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Blocked before any remote call.
    #[error("{0}")]
    LocalValidation(String),

    /// The collaborator answered with `success: false`.
    #[error("Remote rejection: {}", .message.as_deref().unwrap_or("no message"))]
    RemoteRejection { message: Option<String> },

    /// The collaborator could not be reached or its answer could not be read.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// A newer action of the same kind was issued while this one was in flight.
    #[error("Superseded by a newer {0} action")]
    Stale(ActionKind),
}

impl WorkflowError {
    /// Server text worth showing verbatim, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            WorkflowError::RemoteRejection { message } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<ClientError> for WorkflowError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { message } => WorkflowError::RemoteRejection { message },
            other => WorkflowError::Transport(other.to_string()),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

//! `{success, message|error, data|chart}` response envelopes.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, alias = "chart")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Server-provided failure text; the run and upload routes use `message`,
    /// the composition route uses `error`.
    pub fn failure_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

/// Decode a response body into its payload.
///
/// A parsable `success: false` envelope is a rejection whatever the status
/// code. Anything else on a non-2xx status is a status error, and a 2xx body
/// that is not an envelope, or carries no payload, is malformed.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> ClientResult<T> {
    let ok_status = (200..300).contains(&status);

    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) if ok_status => {
            return Err(ClientError::Malformed {
                message: err.to_string(),
            });
        }
        Err(_) => return Err(ClientError::Status { status }),
    };

    if !envelope.success {
        return Err(ClientError::Rejected {
            message: envelope.failure_message(),
        });
    }
    if !ok_status {
        return Err(ClientError::Status { status });
    }

    envelope.data.ok_or_else(|| ClientError::Malformed {
        message: "response has no payload".to_string(),
    })
}

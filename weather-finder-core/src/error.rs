use reqwest::StatusCode;
use thiserror::Error;

use crate::model::ErrorBody;

/// Shown when the backend could not be reached at all.
pub const SERVICE_UNAVAILABLE: &str = "Service Unavailable";

/// Shown when a 2xx body does not match the expected schema.
pub const MALFORMED_RESPONSE: &str = "Malformed response from weather service";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the backend's `error` string when present.
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("failed to reach {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response from {url}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Build a `Rejected` error from a failed response's status and body.
    pub fn rejected(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            }
            Err(_) => truncate_body(body),
        };

        ApiError::Rejected { status, message }
    }

    /// Text placed in the page's error element.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport { .. } => SERVICE_UNAVAILABLE.to_string(),
            ApiError::Malformed { .. } => MALFORMED_RESPONSE.to_string(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

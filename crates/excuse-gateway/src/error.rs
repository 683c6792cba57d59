use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

use excuse_common::ValidationError;

/// Every way a generation request can fail. Each variant ends up as a
/// `success=false` response; none is retried.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("invalid request body: {0}")]
    MalformedBody(String),

    #[error("DATABRICKS_API_TOKEN not configured")]
    MissingCredential,

    #[error("LLM service timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("failed to connect to LLM service: {0}")]
    Transport(String),

    #[error("LLM service error: {status}{}", upstream_hint(.status))]
    Upstream { status: u16 },

    #[error("could not parse LLM response: {0}")]
    Parse(String),
}

fn upstream_hint(status: &u16) -> &'static str {
    match *status {
        401 | 403 => " (credential rejected)",
        404 => " (endpoint not found)",
        429 => " (rate limited)",
        500..=599 => " (endpoint failure)",
        _ => "",
    }
}

impl GenerationError {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout(timeout)
        } else {
            GenerationError::Transport(err.to_string())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) | GenerationError::MalformedBody(_) => "validation",
            GenerationError::MissingCredential => "configuration",
            GenerationError::Timeout(_) | GenerationError::Transport(_) => "transport",
            GenerationError::Upstream { .. } => "upstream",
            GenerationError::Parse(_) => "parse",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerationError::Validation(_) | GenerationError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            GenerationError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            GenerationError::Timeout(_)
            | GenerationError::Transport(_)
            | GenerationError::Upstream { .. }
            | GenerationError::Parse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let e = GenerationError::Upstream { status: 401 };
        assert_eq!(e.to_string(), "LLM service error: 401 (credential rejected)");
        assert_eq!(e.kind(), "upstream");
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);

        let e = GenerationError::Timeout(Duration::from_millis(500));
        assert_eq!(e.to_string(), "LLM service timed out after 0.5s");

        let e = GenerationError::from(ValidationError::MissingField("sender_name"));
        assert_eq!(e.to_string(), "sender_name is required");
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
    }
}

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Failure of a call to the Spotify Web API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("rate limited, retry after {retry_after:?} seconds")]
    RateLimited { retry_after: Option<u64> },

    #[error("not authorized: {0}")]
    Auth(String),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Builds the error for a non-success response, consuming its body.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let retry_after = retry_after(&response);
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED => UpstreamError::Auth(body),
            StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited { retry_after },
            _ => UpstreamError::Status { status, body },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Http(e) => e.status(),
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            UpstreamError::Auth(_) => Some(StatusCode::UNAUTHORIZED),
            UpstreamError::Decode(_) => None,
        }
    }
}

pub(crate) fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

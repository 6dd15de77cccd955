use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level failures. One variant per way a single attempt can go
/// wrong; timeouts are deliberately distinct from HTTP-level rejections.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("{operation} request failed: {message}")]
    Network {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} request timed out")]
    Timeout { operation: &'static str },
    #[error("{operation} request failed with status {status}")]
    RequestFailed {
        operation: &'static str,
        status: StatusCode,
    },
    #[error("{operation} response could not be decoded: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed { status, .. } if *status == StatusCode::NOT_FOUND
        )
    }

    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::InvalidBaseUrl(_) => None,
            Self::Network { operation, .. }
            | Self::Timeout { operation }
            | Self::RequestFailed { operation, .. }
            | Self::Decode { operation, .. } => Some(operation),
        }
    }
}

use reqwest::StatusCode;
use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus { status: StatusCode, url: String },

    #[error("tweet is private or protected (status: {status})")]
    PrivateOrProtected { status: StatusCode },

    #[error("PDF exceeds maximum size of {limit} bytes (size: {size} bytes)")]
    ExceedsMaxSize { size: u64, limit: u64 },

    #[error("could not extract text from PDF (possibly image-based or encrypted)")]
    NoExtractableText,

    #[error("could not extract {0}")]
    NoContent(&'static str),
}

/// Flat view of every way extraction can fail, independent of which layer
/// raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    RequestConstructionFailed,
    NetworkError,
    UnexpectedStatus,
    PrivateOrProtected,
    ExceedsMaxSize,
    NoExtractableText,
    NoContent,
    ResponseReadFailed,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::Fetch(FetchError::RequestConstruction(_)) => ErrorKind::RequestConstructionFailed,
            Self::Fetch(FetchError::Client(_)) => ErrorKind::RequestConstructionFailed,
            Self::Fetch(FetchError::Network { .. }) => ErrorKind::NetworkError,
            Self::Fetch(FetchError::ResponseRead(_)) => ErrorKind::ResponseReadFailed,
            Self::Fetch(FetchError::BodyTooLarge { .. }) => ErrorKind::ExceedsMaxSize,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::PrivateOrProtected { .. } => ErrorKind::PrivateOrProtected,
            Self::ExceedsMaxSize { .. } => ErrorKind::ExceedsMaxSize,
            Self::NoExtractableText => ErrorKind::NoExtractableText,
            Self::NoContent(_) => ErrorKind::NoContent,
        }
    }

    pub fn unexpected_status(status: StatusCode, url: &str) -> Self {
        Self::UnexpectedStatus {
            status,
            url: url.to_string(),
        }
    }
}

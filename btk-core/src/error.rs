use btk_common::{
    post::size::InvalidImageSize,
    reqwest::{self, StatusCode},
};
use btk_extractors::error::ExtractorError;
use thiserror::Error;

use crate::fetcher::FetchStage;

/// Broad classes of [`ToolkitError`], stable enough to map to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NoHandlerFound,
    FetchError,
    ParseError,
}

/// Errors that abort a post fetch.
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    InvalidImageSize(#[from] InvalidImageSize),

    /// The selected handler can't turn the URL into an API query.
    #[error("{handler} can't use this URL: {source}")]
    InvalidUrl {
        handler: &'static str,
        #[source]
        source: ExtractorError,
    },

    #[error("No handler found for {selector}")]
    NoHandlerFound { selector: String },

    #[error("Failed to build the HTTP client: {source}")]
    ClientBuild {
        #[from]
        source: reqwest::Error,
    },

    #[error("Failed to fetch post from {handler}: {source}")]
    FetchFailed {
        handler: &'static str,
        #[source]
        source: ExtractorError,
    },

    #[error("Failed to parse {handler} response: {source}")]
    ParseFailed {
        handler: &'static str,
        #[source]
        source: ExtractorError,
    },
}

impl ToolkitError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } | Self::InvalidImageSize(_) | Self::InvalidUrl { .. } => {
                ErrorKind::InvalidInput
            }
            Self::NoHandlerFound { .. } => ErrorKind::NoHandlerFound,
            Self::ClientBuild { .. } | Self::FetchFailed { .. } => ErrorKind::FetchError,
            Self::ParseFailed { .. } => ErrorKind::ParseError,
        }
    }

    /// Last stage the fetch reached before failing.
    pub const fn stage(&self) -> FetchStage {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidImageSize(_)
            | Self::NoHandlerFound { .. }
            | Self::ClientBuild { .. } => FetchStage::Idle,
            Self::InvalidUrl { .. } | Self::FetchFailed { .. } => FetchStage::HandlerResolved,
            Self::ParseFailed { .. } => FetchStage::Fetched,
        }
    }
}

/// Failures while downloading the post image. Never aborts a fetch, the image is replaced by a
/// placeholder instead.
#[derive(Error, Debug)]
pub enum ImageDownloadError {
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    #[error("Image server returned HTTP {status}")]
    HttpStatus { status: StatusCode },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

use btk_common::reqwest::{self, StatusCode};
use btk_common::serde_json;
use thiserror::Error;

/// Enumerates the possible errors that can arise while handling a booru post.
///
/// Covers every stage a handler is responsible for: turning the post URL into an API query,
/// the network request itself and mapping the response into a
/// [`ParsedPost`](btk_common::post::ParsedPost).
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The supplied post URL can't be turned into an API query by this handler.
    #[error("Invalid post URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// An error occurred during a network request (e.g., connection timeout, DNS failure).
    /// Wraps an underlying `reqwest::Error`.
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    /// The server answered with a non-2xx status code.
    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { status: StatusCode, url: String },

    /// The server returned a body that is not valid JSON.
    #[error("Imageboard returned an invalid response: {source}")]
    InvalidServerResponse {
        #[source]
        source: serde_json::Error,
    },

    /// The JSON response is valid but lacks the minimum structure the handler needs.
    #[error("Unexpected response structure: {message}")]
    UnexpectedStructure { message: String },

    /// A field of the response has a type the handler can't work with.
    /// Wraps an underlying `serde_json::Error`.
    #[error("Error while deserializing JSON: {0}")]
    JsonSerializeFail(#[from] serde_json::Error),

    /// Two handlers were registered under the same normalized name.
    #[error("A handler named {name} is already registered")]
    DuplicateHandler { name: String },
}

impl ExtractorError {
    /// `true` for errors that happen before or during the network round trip.
    ///
    /// The remaining variants come from mapping an already fetched response.
    pub const fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::HttpStatus { .. } | Self::InvalidServerResponse { .. }
        )
    }
}

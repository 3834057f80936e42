//! Error types for the API client.

use reqwest::Method;

/// Errors that can occur when making API requests.
///
/// Client-side and transport failures carry no HTTP status; only
/// [`Error::HttpStatus`] does.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An argument was rejected before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// Only GET and POST are supported.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),
    /// The redirect budget ran out before a non-redirect response arrived.
    #[error("Too many redirects")]
    TooManyRedirects,
    /// A redirect response had a missing or unparsable `Location` header.
    #[error("Invalid redirect target: {0}")]
    InvalidRedirect(String),
    /// The HTTP request failed (connection error, timeout, unreadable body).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The API returned a status >= 400. `body` is the raw response text.
    #[error("HTTP {status}")]
    HttpStatus { status: u16, body: String },
    /// A typed view of a response body could not be deserialized.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status code, present only when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of an HTTP error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True for failures raised before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::UnsupportedMethod(_))
    }

    /// True for network-level failures, including redirect handling.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Request(_) | Error::TooManyRedirects | Error::InvalidRedirect(_)
        )
    }
}

//! Media API client error types.
//!
//! Errors are split into two tiers. Permanent errors carry an [`ErrorCause`]
//! and will fail again for the same input; everything else may succeed on
//! retry.

use std::fmt;

use reqwest::StatusCode;

use super::uri::UriError;

/// Classification tag for permanent errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCause {
    NotFound,
    InvalidUri,
    InvalidDoc,
    /// Reserved; no code path produces it yet.
    InvalidBody,
}

impl ErrorCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCause::NotFound => "not_found",
            ErrorCause::InvalidUri => "invalid_uri",
            ErrorCause::InvalidDoc => "invalid_doc",
            ErrorCause::InvalidBody => "invalid_body",
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permanent failure marker. Retrying without changing the input is pointless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("permanent error: {cause}")]
pub struct PermanentError {
    pub cause: ErrorCause,
}

/// Errors from the media API client.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Document URI could not be parsed.
    #[error("invalid document URI")]
    InvalidUri {
        #[source]
        source: UriError,
    },

    /// Rewritten request URL could not be built from the configured host.
    #[error("create request: invalid host {host:?}")]
    InvalidTarget {
        host: String,
        #[source]
        source: url::ParseError,
    },

    /// Request could not be constructed.
    #[error("create request")]
    CreateRequest(#[source] reqwest::Error),

    /// Media API has no such document.
    #[error("document could not be found")]
    NotFound,

    /// Response body is not a valid document.
    #[error("unmarshal document")]
    InvalidDocument(#[source] serde_json::Error),

    /// Network failure (connect, DNS, TLS, timeout).
    #[error("perform request")]
    Request(#[source] reqwest::Error),

    /// Caller cancelled the request.
    #[error("perform request: cancelled")]
    Cancelled,

    /// Status other than 200 or 404.
    ///
    /// `status_line` holds the reason phrase the server sent, falling back to
    /// the canonical one when the transport reports none.
    #[error("media API responded with: {status_line}")]
    UnexpectedStatus { status: StatusCode, status_line: String },

    /// Reading the response body failed.
    #[error("read media response")]
    ReadBody(#[source] reqwest::Error),
}

impl MediaError {
    /// The permanent classification of this error, if any.
    pub fn permanent(&self) -> Option<PermanentError> {
        let cause = match self {
            MediaError::InvalidUri { .. } | MediaError::InvalidTarget { .. } | MediaError::CreateRequest(_) => {
                ErrorCause::InvalidUri
            }
            MediaError::NotFound => ErrorCause::NotFound,
            MediaError::InvalidDocument(_) => ErrorCause::InvalidDoc,
            MediaError::Request(_)
            | MediaError::Cancelled
            | MediaError::UnexpectedStatus { .. }
            | MediaError::ReadBody(_) => return None,
        };

        Some(PermanentError { cause })
    }

    pub fn cause(&self) -> Option<ErrorCause> {
        self.permanent().map(|p| p.cause)
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent().is_some()
    }
}

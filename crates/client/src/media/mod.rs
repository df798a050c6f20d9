//! Media API client.
//!
//! Fetches the JSON rendition of a rendered news item given its public
//! document URI.
//!
//! ### Wire contract
//!
//! - **Request**: `GET https://{host}{path}.json`, query and fragment of the
//!   document URI preserved.
//! - **200**: body decoded as a [`Document`].
//! - **404**: permanent `not_found`, body is not read.
//! - **Other**: transient error carrying the status line.
//!
//! The client never retries; callers branch on [`MediaError::is_permanent`].

pub mod error;
pub mod uri;

pub use error::{ErrorCause, MediaError, PermanentError};
pub use uri::{JSON_SUFFIX, UriError, parse_document_uri, rendition_url};

use media_core::Document;
use reqwest::{Client, Request, Response, StatusCode, header};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Client for the media API rendition endpoint.
///
/// Holds only read-only configuration, so one instance can serve any number
/// of concurrent calls.
#[derive(Debug, Clone)]
pub struct MediaClient {
    span: tracing::Span,
    http: Client,
    host: String,
}

impl MediaClient {
    /// Create a new media client.
    ///
    /// `span` is the logging sink every call is recorded under, `http` the
    /// transport and `host` the media API host (optionally with port). The
    /// host is not validated until the first call.
    pub fn new(span: tracing::Span, http: Client, host: impl Into<String>) -> Self {
        Self { span, http, host: host.into() }
    }

    /// Configured media API host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch and decode the rendered document for `doc_uri`.
    ///
    /// The in-flight request is abandoned as soon as `cancel` fires. The
    /// `_reserved` slot is accepted for interface compatibility and ignored.
    pub async fn get_rendered_document(
        &self, cancel: &CancellationToken, doc_uri: &str, _reserved: Option<&[u8]>,
    ) -> Result<Document, MediaError> {
        let request = self.build_request(doc_uri)?;

        let exchange = self.exchange(request).instrument(self.span.clone());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(parent: &self.span, doc_uri, "rendered document request cancelled");
                Err(MediaError::Cancelled)
            }
            result = exchange => result,
        }
    }

    fn build_request(&self, doc_uri: &str) -> Result<Request, MediaError> {
        let parsed = parse_document_uri(doc_uri).map_err(|source| MediaError::InvalidUri { source })?;

        // Switch to the configured media host and select the JSON rendition.
        let target =
            rendition_url(&parsed, &self.host).map_err(|source| MediaError::InvalidTarget {
                host: self.host.clone(),
                source,
            })?;

        self.http
            .get(target)
            .header(header::ACCEPT, "application/json")
            .build()
            .map_err(MediaError::CreateRequest)
    }

    async fn exchange(&self, request: Request) -> Result<Document, MediaError> {
        let url = request.url().clone();
        tracing::debug!(%url, "requesting rendered document");

        let response = self.http.execute(request).await.map_err(MediaError::Request)?;

        let status = response.status();
        tracing::debug!(%url, %status, "media API response");

        match status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(MediaError::NotFound),
            status => {
                let status_line = status_line(&response);
                tracing::warn!(%url, %status_line, "unexpected media API status");
                return Err(MediaError::UnexpectedStatus { status, status_line });
            }
        }

        let payload = response.bytes().await.map_err(MediaError::ReadBody)?;

        Document::from_slice(&payload).map_err(MediaError::InvalidDocument)
    }
}

/// Status line as sent by the server, e.g. `503 Backend Draining`.
fn status_line(response: &Response) -> String {
    let status = response.status();
    let reason = response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned())
        .or_else(|| status.canonical_reason().map(str::to_string));

    match reason {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

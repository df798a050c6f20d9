//! Client code for media-client.
//!
//! This crate provides the media API client that fetches rendered news-item
//! documents, together with its permanent/transient error taxonomy.

pub mod media;

pub use media::{ErrorCause, MediaClient, MediaError, PermanentError, UriError, parse_document_uri, rendition_url};

pub use media_core::{Association, Document, Rendition};

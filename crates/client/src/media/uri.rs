//! Document URI parsing and the JSON rendition URL rewrite.

use url::Url;

/// Path suffix selecting the JSON rendition of a document.
pub const JSON_SUFFIX: &str = ".json";

/// Base that relative document references are resolved against. Only the
/// path, query and fragment of the result are kept by [`rendition_url`].
const REFERENCE_BASE: &str = "https://document.invalid/";

/// Error type for document URI parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("invalid control character in URI")]
    ControlCharacter,

    #[error("parse URI")]
    Parse(#[source] url::ParseError),
}

/// Parse a document URI.
///
/// Absolute URIs and URI references (`/media/text/abc`) are both accepted.
/// Any ASCII control character rejects the input, including tabs and
/// newlines that `url` would otherwise strip.
pub fn parse_document_uri(input: &str) -> Result<Url, UriError> {
    if input.bytes().any(|b| b.is_ascii_control()) {
        return Err(UriError::ControlCharacter);
    }

    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(REFERENCE_BASE).map_err(UriError::Parse)?;
            base.join(input).map_err(UriError::Parse)
        }
        Err(e) => Err(UriError::Parse(e)),
    }
}

/// Rewrite a public document URI into its JSON rendition on the media API.
///
/// The scheme is forced to `https`, host and port are taken from `host`,
/// `.json` is appended to the path. Userinfo, query and fragment are kept.
pub fn rendition_url(doc_uri: &Url, host: &str) -> Result<Url, url::ParseError> {
    let mut target = Url::parse(&format!("https://{host}"))?;

    if target.host_str().is_none() {
        return Err(url::ParseError::EmptyHost);
    }

    // Only fails for URLs without a host, ruled out above.
    target.set_username(doc_uri.username()).map_err(|()| url::ParseError::EmptyHost)?;
    target.set_password(doc_uri.password()).map_err(|()| url::ParseError::EmptyHost)?;

    target.set_path(&format!("{}{}", doc_uri.path(), JSON_SUFFIX));
    target.set_query(doc_uri.query());
    target.set_fragment(doc_uri.fragment());

    Ok(target)
}

use std::sync::LazyLock;

use regex::bytes::Regex;

use super::error::{IngestError, IngestResult};

/// Literal that must appear somewhere in an upload body.
const URL_MARKER: &[u8] = b"url";

// Scheme, dotted host, then an optional path/query/fragment tail.
static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?-u)(http|ftp|https)://([\w\-]+(?:(?:\.[\w\-]+)+))([\w\-.,@?^=%&;:/~+#]*[\w\-@?^=%&;/~+#])?",
    )
    .expect("absolute url pattern is valid")
});

/// Pulls the first absolute URL out of an untyped upload body.
///
/// The body has to contain the `url` marker somewhere; after that the
/// leftmost match wins and every later URL is ignored. The match is returned
/// verbatim, without percent-decoding or normalisation.
pub fn extract_url(body: &[u8]) -> IngestResult<String> {
    if !contains(body, URL_MARKER) {
        return Err(IngestError::NoUrlFound);
    }

    let found = ABSOLUTE_URL.find(body).ok_or(IngestError::NoUrlFound)?;
    Ok(String::from_utf8_lossy(found.as_bytes()).into_owned())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

use percent_encoding::percent_decode_str;
use url::Url;

use super::error::{IngestError, IngestResult};

/// Number of hex characters kept from the encoded file name.
pub const TOKEN_LEN: usize = 16;

/// Deterministic name of a job's files: `<token><extension>` for the raw
/// download, `<token>.m3u8` and `<token>NNN.ts` for the artifacts.
///
/// The token only looks at the last path segment, so two URLs ending in the
/// same file name share a token. Truncation also lets distinct names that
/// agree on their first eight bytes collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub token: String,
    pub extension: String,
}

impl Identity {
    pub fn from_url(raw_url: &str) -> IngestResult<Self> {
        let parsed = Url::parse(raw_url).map_err(|e| IngestError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        // Decode first, then split: an encoded `%2F` separates segments too.
        let path: Vec<u8> = percent_decode_str(parsed.path()).collect();
        let name = path
            .split(|b| *b == b'/')
            .filter(|segment| !segment.is_empty())
            .last()
            .ok_or_else(|| IngestError::MissingFileName(raw_url.to_string()))?;

        Ok(Self {
            token: token_for(name),
            extension: url_extension(raw_url).to_string(),
        })
    }

    /// File name of the raw download inside the files directory.
    pub fn raw_file_name(&self) -> String {
        format!("{}{}", self.token, self.extension)
    }

    pub fn manifest_file_name(&self) -> String {
        format!("{}.m3u8", self.token)
    }

    /// Output pattern handed to the segmenter, `%03d` expands to the index.
    pub fn segment_pattern(&self) -> String {
        format!("{}%03d.ts", self.token)
    }

    pub fn segment_file_name(&self, index: u32) -> String {
        format!("{}{:03}.ts", self.token, index)
    }
}

// Short names are right-padded with '0' so every token has the same width.
fn token_for(name: &[u8]) -> String {
    let mut token = hex::encode(name);
    if token.len() >= TOKEN_LEN {
        token.truncate(TOKEN_LEN);
    } else {
        token.extend(std::iter::repeat_n('0', TOKEN_LEN - token.len()));
    }
    token
}

/// Extension of the last dot-segment of the full URL string, dot included.
///
/// This runs on the raw URL rather than the parsed path, so a query string
/// with a dot in it ends up as the extension.
pub fn url_extension(raw_url: &str) -> &str {
    let tail = raw_url.rsplit('/').next().unwrap_or(raw_url);
    match tail.rfind('.') {
        Some(idx) => &tail[idx..],
        None => "",
    }
}

use std::path::{Path, PathBuf};

use super::error::IngestResult;
use super::identity::Identity;

/// One upload, carried by value through every stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestJob {
    pub source_url: String,
    pub identity: Identity,
    pub raw_file_path: PathBuf,
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
}

impl IngestJob {
    pub fn new(source_url: String, files_dir: &Path, output_dir: &Path) -> IngestResult<Self> {
        let identity = Identity::from_url(&source_url)?;
        let raw_file_path = files_dir.join(identity.raw_file_name());
        let manifest_path = output_dir.join(identity.manifest_file_name());

        Ok(Self {
            source_url,
            identity,
            raw_file_path,
            output_dir: output_dir.to_path_buf(),
            manifest_path,
        })
    }

    pub fn token(&self) -> &str {
        &self.identity.token
    }

    pub fn file_extension(&self) -> &str {
        &self.identity.extension
    }

    pub fn segment_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(self.identity.segment_file_name(index))
    }
}

/// What the downloader saw while fetching the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub status: Option<u16>,
    pub bytes_written: u64,
    pub transport_error: Option<String>,
}

impl DownloadReport {
    pub fn is_clean(&self) -> bool {
        self.transport_error.is_none() && matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// Human readable reason a download is not clean.
    pub fn failure_reason(&self) -> Option<String> {
        if let Some(err) = &self.transport_error {
            return Some(err.clone());
        }
        match self.status {
            Some(code) if (200..300).contains(&code) => None,
            Some(code) => Some(format!("origin answered with status {}", code)),
            None => Some("no response from origin".to_string()),
        }
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("url can't be found")]
    NoUrlFound,
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("url {0} has no file name in its path")]
    MissingFileName(String),
    #[error("download of {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("io error at {path}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl IngestError {
    /// Errors caused by the request itself, reported back to the caller.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            IngestError::NoUrlFound | IngestError::InvalidUrl { .. } | IngestError::MissingFileName(_)
        )
    }
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Failure of the download + segmentation stages of one job.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Segment(#[from] crate::workers::segmenter::SegmentError),
}

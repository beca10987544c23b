use tracing::{error, info, warn};

use super::error::{IngestError, IngestResult, PipelineError};
use super::extractor::extract_url;
use super::model::{DownloadReport, IngestJob};
use crate::config::settings::AppConfig;
use crate::state::AppState;
use crate::workers::segmenter::SegmentReport;

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub download: DownloadReport,
    pub segments: SegmentReport,
}

pub struct IngestService;

impl IngestService {
    /// Validates an upload body and turns it into a job. Nothing touches the
    /// filesystem here.
    pub fn prepare(config: &AppConfig, body: &[u8]) -> IngestResult<IngestJob> {
        let url = extract_url(body)?;
        IngestJob::new(url, &config.files_dir, &config.output_dir)
    }

    /// Downloads the source, then segments it. Each stage waits for the
    /// previous one to finish.
    pub async fn process(state: &AppState, job: &IngestJob) -> Result<PipelineReport, PipelineError> {
        let download = state.downloader.fetch(job).await?;

        if let Some(reason) = download.failure_reason() {
            if state.config.strict_downloads {
                return Err(IngestError::Transport {
                    url: job.source_url.clone(),
                    reason,
                }
                .into());
            }
            warn!(identity = %job.token(), "Segmenting a download that was not clean: {}", reason);
        }

        let segments = state.segmenter.run(job).await?;

        Ok(PipelineReport { download, segments })
    }

    /// Runs [`IngestService::process`] and records the outcome in the log.
    /// Used by the upload handler, which has already answered the client.
    pub async fn run_logged(state: &AppState, job: &IngestJob) {
        match Self::process(state, job).await {
            Ok(report) => info!(
                identity = %job.token(),
                bytes = report.download.bytes_written,
                segments = report.segments.segments.len(),
                "✅ Job completed: {}",
                report.segments.manifest_path.display()
            ),
            Err(e) => error!(identity = %job.token(), url = %job.source_url, "❌ Job failed: {}", e),
        }
    }
}

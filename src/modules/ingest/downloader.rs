use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::error::{IngestError, IngestResult};
use super::model::{DownloadReport, IngestJob};

/// Streams a job's source URL into its raw file.
///
/// The response status is recorded but never checked, so an error page is
/// stored exactly like media. Transport failures end the transfer early and
/// are reported in the [`DownloadReport`]; only local filesystem failures are
/// returned as errors.
#[derive(Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, job: &IngestJob) -> IngestResult<DownloadReport> {
        let path = &job.raw_file_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| IngestError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let mut file = fs::File::create(path)
            .await
            .map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let mut report = DownloadReport::default();

        let response = match self.client.get(&job.source_url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(identity = %job.token(), url = %job.source_url, "download request failed: {}", e);
                report.transport_error = Some(e.to_string());
                return Ok(report);
            }
        };
        report.status = Some(response.status().as_u16());

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let data = match chunk {
                Ok(d) => d,
                Err(e) => {
                    warn!(identity = %job.token(), "download interrupted after {} bytes: {}", report.bytes_written, e);
                    report.transport_error = Some(e.to_string());
                    break;
                }
            };
            file.write_all(&data)
                .await
                .map_err(|source| IngestError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            report.bytes_written += data.len() as u64;
        }

        file.flush().await.map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            identity = %job.token(),
            status = ?report.status,
            bytes = report.bytes_written,
            "⬇️ Download finished"
        );
        Ok(report)
    }
}

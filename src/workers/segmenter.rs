use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::fs;
use tokio::process::Command;
use tracing::{error, info};

use crate::modules::ingest::model::IngestJob;

/// Lines of transcoder stderr kept for diagnostics.
const STDERR_TAIL_LINES: usize = 50;

pub const AUDIO_BITRATE: &str = "128k";
pub const SEGMENT_SECONDS: u32 = 10;
pub const SEGMENT_FORMAT: &str = "mpegts";
pub const VIDEO_CODEC: &str = "libx264";
pub const AUDIO_CODEC: &str = "aac";

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("failed to start transcoder {bin}: {source}")]
    Spawn {
        bin: PathBuf,
        source: std::io::Error,
    },
    #[error("transcoder exited with {code:?}: {stderr_tail}")]
    Exited {
        code: Option<i32>,
        stderr_tail: String,
    },
    #[error("io error at {path}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Artifacts the transcoder left behind for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentReport {
    pub identity: String,
    pub manifest_path: PathBuf,
    pub segments: Vec<PathBuf>,
    pub stderr_tail: String,
}

/// Runs the external transcoder that splits a raw download into an HLS
/// playlist plus ten second MPEG-TS segments.
#[derive(Debug, Clone)]
pub struct Segmenter {
    bin: PathBuf,
}

impl Segmenter {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    /// Fixed argument list handed to the transcoder.
    pub fn args(&self, job: &IngestJob) -> Vec<OsString> {
        let segment_output = job.output_dir.join(job.identity.segment_pattern());
        vec![
            "-i".into(),
            job.raw_file_path.clone().into_os_string(),
            "-b:a".into(),
            AUDIO_BITRATE.into(),
            "-f".into(),
            "segment".into(),
            "-segment_time".into(),
            SEGMENT_SECONDS.to_string().into(),
            "-segment_list".into(),
            job.manifest_path.clone().into_os_string(),
            "-segment_format".into(),
            SEGMENT_FORMAT.into(),
            "-vcodec".into(),
            VIDEO_CODEC.into(),
            "-acodec".into(),
            AUDIO_CODEC.into(),
            segment_output.into_os_string(),
        ]
    }

    pub async fn run(&self, job: &IngestJob) -> Result<SegmentReport, SegmentError> {
        fs::create_dir_all(&job.output_dir)
            .await
            .map_err(|source| SegmentError::Io {
                path: job.output_dir.clone(),
                source,
            })?;

        info!(identity = %job.token(), "🎥 Segmenting {}", job.raw_file_path.display());

        let output = Command::new(&self.bin)
            .args(self.args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| {
                error!(identity = %job.token(), "❌ Could not start {}: {}", self.bin.display(), source);
                SegmentError::Spawn {
                    bin: self.bin.clone(),
                    source,
                }
            })?;

        let stderr_tail = tail_lines(&String::from_utf8_lossy(&output.stderr), STDERR_TAIL_LINES);

        if !output.status.success() {
            error!(
                identity = %job.token(),
                code = ?output.status.code(),
                "❌ Transcoder failed:\n{}",
                stderr_tail
            );
            return Err(SegmentError::Exited {
                code: output.status.code(),
                stderr_tail,
            });
        }

        let segments = list_segments(&job.output_dir, job.token()).await?;
        info!(identity = %job.token(), segments = segments.len(), "✅ Segmentation complete");

        Ok(SegmentReport {
            identity: job.token().to_string(),
            manifest_path: job.manifest_path.clone(),
            segments,
            stderr_tail,
        })
    }
}

fn tail_lines(text: &str, keep: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(keep);
    lines[start..].join("\n")
}

/// Segment files `<token>NNN.ts` in `dir`, ordered by index.
async fn list_segments(dir: &Path, token: &str) -> Result<Vec<PathBuf>, SegmentError> {
    let io_err = |source: std::io::Error| SegmentError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut indexed = Vec::new();
    let mut entries = fs::read_dir(dir).await.map_err(io_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(index) = segment_index(name, token) {
            indexed.push((index, entry.path()));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}

fn segment_index(file_name: &str, token: &str) -> Option<u32> {
    let digits = file_name.strip_prefix(token)?.strip_suffix(".ts")?;
    if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> IngestJob {
        IngestJob::new(
            "https://example.com/media/sample.mp4".to_string(),
            Path::new("files"),
            Path::new("output"),
        )
        .unwrap()
    }

    #[test]
    fn args_use_the_fixed_parameter_set() {
        let args: Vec<String> = Segmenter::new("ffmpeg")
            .args(&job())
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-i",
                "files/73616d706c652e6d.mp4",
                "-b:a",
                "128k",
                "-f",
                "segment",
                "-segment_time",
                "10",
                "-segment_list",
                "output/73616d706c652e6d.m3u8",
                "-segment_format",
                "mpegts",
                "-vcodec",
                "libx264",
                "-acodec",
                "aac",
                "output/73616d706c652e6d%03d.ts",
            ]
        );
    }

    #[test]
    fn segment_index_only_accepts_own_segments() {
        assert_eq!(segment_index("abc000.ts", "abc"), Some(0));
        assert_eq!(segment_index("abc1234.ts", "abc"), Some(1234));
        assert_eq!(segment_index("abc.m3u8", "abc"), None);
        assert_eq!(segment_index("abc01.ts", "abc"), None);
        assert_eq!(segment_index("xyz000.ts", "abc"), None);
    }

    #[test]
    fn tail_keeps_last_lines() {
        let text = "one\n\ntwo\nthree\n";
        assert_eq!(tail_lines(text, 2), "two\nthree");
        assert_eq!(tail_lines(text, 10), "one\ntwo\nthree");
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let job = IngestJob::new(
            "https://example.com/media/sample.mp4".to_string(),
            &dir.path().join("files"),
            &dir.path().join("output"),
        )
        .unwrap();

        let result = Segmenter::new(dir.path().join("no-such-transcoder")).run(&job).await;
        assert!(matches!(result, Err(SegmentError::Spawn { .. })));
        assert!(dir.path().join("output").is_dir());
    }
}

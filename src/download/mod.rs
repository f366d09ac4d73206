
use std::path::Path;
use std::process::ExitStatus;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to run downloader: {0}")]
    Io(#[from] std::io::Error),
    #[error("downloader exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("downloader reported success but produced no file")]
    MissingOutput,
}

type Result<T> = std::result::Result<T, DownloadError>;

#[automock]
#[async_trait]
pub trait VideoDownloader: Send + Sync {
    /// Download the video at `url` into the file at `dest`.
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Downloads videos by shelling out to a `yt-dlp` compatible binary.
pub struct YtDlpDownloader {
    program: String,
}

impl YtDlpDownloader {
    pub fn new(program: &str) -> Self {
        Self { program: program.to_string() }
    }
}

#[async_trait]
impl VideoDownloader for YtDlpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        debug!("Downloading {url} to {}", dest.display());

        let output = Command::new(&self.program)
            .arg("--quiet")
            .arg("-f")
            .arg("mp4")
            .arg("-o")
            .arg(dest)
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(DownloadError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !dest.exists() {
            return Err(DownloadError::MissingOutput);
        }

        Ok(())
    }
}

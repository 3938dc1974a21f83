//! Markdown report persistence

use crate::error::Result;
use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Writes one timestamped markdown file per analysis
///
/// Files are named `{prefix}_{YYYYMMDD_HHMMSS}.md`, are opened with
/// create-new semantics and are never read back.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl ReportWriter {
    /// Prefix used by the terminal front end
    pub const TERMINAL_PREFIX: &'static str = "report";

    /// Prefix used by the web front end
    pub const WEB_PREFIX: &'static str = "dashboard";

    /// Create a writer for `output_dir` with the terminal prefix
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(output_dir, Self::TERMINAL_PREFIX)
    }

    /// Create a writer with a custom file name prefix
    pub fn with_prefix(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path a report stamped at `at` would be written to
    pub fn path_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        self.output_dir
            .join(format!("{}_{}.md", self.prefix, at.format("%Y%m%d_%H%M%S")))
    }

    /// Write `content` stamped with the current local time
    pub async fn write(&self, content: &str) -> Result<PathBuf> {
        self.write_at(content, &Local::now()).await
    }

    /// Write `content` stamped with `at`
    ///
    /// Fails with an I/O error if a report with the same stamp exists.
    pub async fn write_at<Tz: TimeZone>(&self, content: &str, at: &DateTime<Tz>) -> Result<PathBuf>
    where
        Tz::Offset: std::fmt::Display,
    {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.path_at(at);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        info!(path = %path.display(), bytes = content.len(), "Saved report");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use chrono::Utc;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[tokio::test]
    async fn test_write_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let content = "| Metric | AAPL |\n|---|---|\n| P/E | 29.1 |\n\u{1F4C8} ok";

        let path = writer.write_at(content, &stamp()).await.unwrap();

        assert_eq!(path, dir.path().join("report_20250314_092653.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[tokio::test]
    async fn test_write_uses_prefix_and_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::with_prefix(dir.path(), ReportWriter::WEB_PREFIX);

        let path = writer.write("analysis").await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        let stamp = name
            .strip_prefix("dashboard_")
            .and_then(|rest| rest.strip_suffix(".md"))
            .unwrap();
        let (date, time) = stamp.split_once('_').unwrap();
        assert_eq!(date.len(), 8);
        assert_eq!(time.len(), 6);
        assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        let path = writer.write_at("first", &stamp()).await.unwrap();
        let err = writer.write_at("second", &stamp()).await.unwrap_err();

        assert!(matches!(err, FinanceError::Report(ref io) if io.kind() == std::io::ErrorKind::AlreadyExists));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "first");
    }

    #[tokio::test]
    async fn test_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));
        let path = writer.write_at("", &stamp()).await.unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
    }
}

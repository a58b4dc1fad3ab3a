//! Per-format summaries of persisted artifacts
//!
//! Each variant re-reads the artifact from disk rather than reusing the fetched payload:
//! 1. Text - word frequencies in first-seen order
//! 2. Csv - data row count and header columns
//! 3. Spreadsheet - row count, columns and descriptive statistics
//! 4. JsonRecords - number of records under the configured key
//!
//! Summaries replace any previous file at the output path and are only moved into place
//! once fully computed and written.

use crate::error::{Error, Result};
use crate::types::SourceFormat;
use crate::utils::write_atomic;
use std::path::Path;
use tracing::{debug, info};

pub mod records;
pub mod spreadsheet;
pub mod tabular;
pub mod text;

/// Stateless summarizer for persisted artifacts
#[derive(Clone, Debug)]
pub struct Processor {
    records_key: String,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new("people")
    }
}

impl Processor {
    /// Create a processor; `records_key` selects the record list in JSON documents
    pub fn new(records_key: impl Into<String>) -> Self {
        Self {
            records_key: records_key.into(),
        }
    }

    /// Summarize the artifact at `artifact` as `format` and write the result to `output`
    ///
    /// Returns the summary text that was written.
    pub async fn process(
        &self,
        format: SourceFormat,
        artifact: &Path,
        output: &Path,
    ) -> Result<String> {
        debug!(%format, artifact = %artifact.display(), "summarizing artifact");

        let summary = match format {
            SourceFormat::Text => text::summarize(&read_text(artifact).await?),
            SourceFormat::Csv => tabular::summarize(&read_text(artifact).await?)?,
            SourceFormat::Spreadsheet => {
                let path = artifact.to_path_buf();
                tokio::task::spawn_blocking(move || spreadsheet::summarize(&path))
                    .await
                    .map_err(|e| {
                        Error::Io(std::io::Error::other(format!(
                            "spreadsheet task failed: {e}"
                        )))
                    })??
            }
            SourceFormat::JsonRecords => {
                records::summarize(&read_text(artifact).await?, &self.records_key)?
            }
        };

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        write_atomic(output, summary.as_bytes()).await?;

        info!(%format, output = %output.display(), "summary saved");
        Ok(summary)
    }
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read artifact '{}': {}", path.display(), e),
        ))
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    async fn run(format: SourceFormat, content: &[u8]) -> (Result<String>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("artifact");
        std::fs::write(&artifact, content).unwrap();
        let output = dir.path().join("results.txt");
        let result = Processor::default().process(format, &artifact, &output).await;
        (result, dir)
    }

    #[tokio::test]
    async fn text_summary_is_written() {
        let (result, dir) = run(SourceFormat::Text, b"The cat sat. The dog sat.").await;

        let summary = result.unwrap();
        let written = std::fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert_eq!(written, summary);
        assert_eq!(written, "the: 2\ncat: 1\nsat: 2\ndog: 1\n");
    }

    #[tokio::test]
    async fn empty_text_writes_empty_summary() {
        let (result, dir) = run(SourceFormat::Text, b"").await;

        assert_eq!(result.unwrap(), "");
        assert!(dir.path().join("results.txt").is_file());
    }

    #[tokio::test]
    async fn csv_summary_is_written() {
        let (result, _dir) = run(SourceFormat::Csv, b"a,b,c\n1,2,3\n4,5,6\n7,8,9\n").await;
        assert_eq!(
            result.unwrap(),
            "Number of rows: 3\nColumns: ['a', 'b', 'c']\n"
        );
    }

    #[tokio::test]
    async fn json_summary_uses_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("data.json");
        std::fs::write(&artifact, r#"{"crew": [1, 2, 3]}"#).unwrap();
        let output = dir.path().join("results_json.txt");

        let summary = Processor::new("crew")
            .process(SourceFormat::JsonRecords, &artifact, &output)
            .await
            .unwrap();

        assert_eq!(summary, "Number of records: 3\n");
    }

    #[tokio::test]
    async fn output_is_truncated_on_rerun() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("data.txt");
        let output = dir.path().join("results_txt.txt");
        std::fs::write(&output, "stale line\n".repeat(100)).unwrap();
        std::fs::write(&artifact, "one").unwrap();

        Processor::default()
            .process(SourceFormat::Text, &artifact, &output)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "one: 1\n");
    }

    #[tokio::test]
    async fn corrupt_spreadsheet_leaves_no_summary() {
        let (result, dir) = run(SourceFormat::Spreadsheet, b"garbage bytes").await;

        let err = result.unwrap_err();
        assert_eq!(err.class(), ErrorClass::Decode);
        assert!(!dir.path().join("results.txt").exists());
    }

    #[tokio::test]
    async fn malformed_json_leaves_no_summary() {
        let (result, dir) = run(SourceFormat::JsonRecords, b"[1, 2").await;

        assert_eq!(result.unwrap_err().class(), ErrorClass::Decode);
        assert!(!dir.path().join("results.txt").exists());
    }

    #[tokio::test]
    async fn missing_artifact_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Processor::default()
            .process(
                SourceFormat::Csv,
                &dir.path().join("missing.csv"),
                &dir.path().join("out.txt"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::Io);
    }
}

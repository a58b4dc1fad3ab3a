//! Core types shared by the pipeline stages

use crate::error::{Error, ErrorClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Supported dataset formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Plain text, summarized as word frequencies
    Text,
    /// Delimited tabular text with a header row
    Csv,
    /// Binary workbook (xls, xlsx, ods)
    Spreadsheet,
    /// JSON object holding a list of records
    JsonRecords,
}

impl SourceFormat {
    /// Short label used in log lines and the run report
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Text => "text",
            SourceFormat::Csv => "csv",
            SourceFormat::Spreadsheet => "spreadsheet",
            SourceFormat::JsonRecords => "json_records",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetched content, typed per format
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Decoded text (text and csv sources)
    Text(String),
    /// Opaque bytes (spreadsheet sources)
    Bytes(Vec<u8>),
    /// Parsed JSON tree (json-records sources)
    Json(serde_json::Value),
}

impl Payload {
    /// Format-neutral name of the payload kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Bytes(_) => "bytes",
            Payload::Json(_) => "json",
        }
    }
}

/// A payload written to disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedArtifact {
    /// Final location of the artifact
    pub path: PathBuf,
    /// Number of bytes written
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the file contents
    pub sha256: String,
}

/// Pipeline stage, used to attribute failures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Network retrieval
    Fetch,
    /// Writing the artifact
    Persist,
    /// Summarizing the artifact
    Process,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Fetch => "fetch",
            Stage::Persist => "persist",
            Stage::Process => "process",
        })
    }
}

/// Lifecycle of a single pipeline
///
/// `Pending → Fetched → Persisted → Summarized`, or `Failed` from any non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    /// Not started
    Pending,
    /// Payload retrieved
    Fetched,
    /// Artifact written
    Persisted,
    /// Summary written (terminal)
    Summarized,
    /// A stage failed (terminal)
    Failed,
}

impl PipelineState {
    /// Whether no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Summarized | PipelineState::Failed)
    }

    /// The stage that moves a pipeline out of this state, if any
    pub fn next_stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Pending => Some(Stage::Fetch),
            PipelineState::Fetched => Some(Stage::Persist),
            PipelineState::Persisted => Some(Stage::Process),
            PipelineState::Summarized | PipelineState::Failed => None,
        }
    }
}

/// Failure details recorded for a pipeline that did not complete
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFailure {
    /// Stage that failed
    pub stage: Stage,
    /// Network, I/O or decode
    pub class: ErrorClass,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl PipelineFailure {
    /// Capture an error raised by `stage`
    pub fn new(stage: Stage, error: &Error) -> Self {
        Self {
            stage,
            class: error.class(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Final state of one pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Source name from the descriptor
    pub name: String,
    /// Dataset format
    pub format: SourceFormat,
    /// Terminal state reached
    pub state: PipelineState,
    /// Artifact details, when the persist stage succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PersistedArtifact>,
    /// Summary path, when the process stage succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_path: Option<PathBuf>,
    /// Failure details, when the pipeline failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<PipelineFailure>,
}

impl PipelineOutcome {
    /// Whether the pipeline reached `Summarized`
    pub fn succeeded(&self) -> bool {
        self.state == PipelineState::Summarized
    }
}

/// Aggregate result of one orchestrator run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the last pipeline reached a terminal state
    pub finished_at: DateTime<Utc>,
    /// One entry per configured source, in configuration order
    pub pipelines: Vec<PipelineOutcome>,
}

impl RunReport {
    /// Whether any pipeline failed
    pub fn has_failures(&self) -> bool {
        self.pipelines.iter().any(|p| !p.succeeded())
    }

    /// Number of pipelines that reached `Summarized`
    pub fn succeeded_count(&self) -> usize {
        self.pipelines.iter().filter(|p| p.succeeded()).count()
    }

    /// Outcomes of failed pipelines
    pub fn failures(&self) -> impl Iterator<Item = &PipelineOutcome> {
        self.pipelines.iter().filter(|p| !p.succeeded())
    }
}

//! # dataset-dl
//!
//! Fetches remote datasets, keeps a local copy of each, and writes a short summary per
//! dataset.
//!
//! ## Pipelines
//!
//! Every configured source runs through the same three stages:
//! - **Fetch** - one HTTP GET, status checked, body decoded per format
//! - **Persist** - the payload is written to `<base>/<prefix><folder>/<filename>`
//! - **Process** - the artifact is read back from disk and summarized
//!
//! Four formats are supported: plain text (word frequencies), CSV (row count and columns),
//! spreadsheets (row count, columns and descriptive statistics) and JSON record lists
//! (record count). A failure in one pipeline is logged and recorded in the [`RunReport`]
//! without affecting the others.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dataset_dl::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::new(Config::default())?;
//!     let report = orchestrator.run().await;
//!
//!     for failed in report.failures() {
//!         println!("{} failed: {:?}", failed.name, failed.failure);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Byline with sample-dataset statistics
pub mod byline;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTP retrieval
pub mod fetch;
/// Pipeline orchestration
pub mod orchestrator;
/// Artifact persistence
pub mod persist;
/// Per-format summaries
pub mod processor;
/// Folder provisioning
pub mod provision;
/// Descriptive statistics
pub mod stats;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, SourceDescriptor};
pub use error::{DecodeError, Error, ErrorClass, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use orchestrator::Orchestrator;
pub use processor::Processor;
pub use types::{
    Payload, PersistedArtifact, PipelineFailure, PipelineOutcome, PipelineState, RunReport,
    SourceFormat, Stage,
};

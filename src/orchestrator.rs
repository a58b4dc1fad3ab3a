//! Pipeline orchestration
//!
//! Every configured source runs through its own pipeline:
//! 1. Fetch - retrieve the payload (`Pending → Fetched`)
//! 2. Persist - write the artifact (`Fetched → Persisted`)
//! 3. Process - summarize the artifact from disk (`Persisted → Summarized`)
//!
//! A failing stage moves the pipeline to `Failed` and no later stage runs. Failures are
//! logged and recorded in the [`RunReport`]; they never stop other pipelines.

use crate::config::{Config, SourceDescriptor};
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::persist::{persist, to_pretty_json};
use crate::processor::Processor;
use crate::provision::FolderProvisioner;
use crate::types::{PipelineFailure, PipelineOutcome, PipelineState, RunReport, Stage};
use crate::utils::write_atomic;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Drives the fetch → persist → process pipelines for a configuration
pub struct Orchestrator {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
    processor: Processor,
}

impl Orchestrator {
    /// Create an orchestrator that fetches over HTTP
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` does not validate.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_fetcher(config, Arc::new(HttpFetcher::new()))
    }

    /// Create an orchestrator with a custom fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;
        let processor = Processor::new(config.records_key.clone());
        Ok(Self {
            config: Arc::new(config),
            fetcher,
            processor,
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every pipeline to a terminal state
    ///
    /// Destination folders are provisioned once up front. Pipelines run one after another
    /// unless [`Config::concurrent`] is set. The returned report lists the outcome of every
    /// source in configuration order.
    pub async fn run(&self) -> RunReport {
        let started_at = Utc::now();
        info!(
            sources = self.config.sources.len(),
            concurrent = self.config.concurrent,
            "starting pipelines"
        );

        self.provision_folders().await;

        let pipelines = if self.config.concurrent {
            join_all(self.config.sources.iter().map(|s| self.run_pipeline(s))).await
        } else {
            let mut outcomes = Vec::with_capacity(self.config.sources.len());
            for source in &self.config.sources {
                outcomes.push(self.run_pipeline(source).await);
            }
            outcomes
        };

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            pipelines,
        };

        info!(
            succeeded = report.succeeded_count(),
            failed = report.pipelines.len() - report.succeeded_count(),
            "pipelines finished"
        );

        if let Some(path) = &self.config.report_path {
            let path = self.config.base_dir.join(path);
            if let Err(e) = write_report(&report, &path).await {
                warn!(path = %path.display(), error = %e, "failed to write run report");
            }
        }

        report
    }

    async fn provision_folders(&self) {
        let folders: Vec<&str> = self
            .config
            .sources
            .iter()
            .map(|s| s.folder.as_str())
            .collect();

        // Persist creates its folder as well, so a failure here is not fatal
        if let Err(e) = FolderProvisioner::new(&self.config.base_dir)
            .create_prefixed_folders(&folders, &self.config.folder_prefix)
            .await
        {
            warn!(error = %e, "failed to provision destination folders");
        }
    }

    /// Run a single pipeline to a terminal state
    pub async fn run_pipeline(&self, source: &SourceDescriptor) -> PipelineOutcome {
        let mut outcome = PipelineOutcome {
            name: source.name.clone(),
            format: source.format,
            state: PipelineState::Pending,
            artifact: None,
            summary_path: None,
            failure: None,
        };

        let payload = match self.fetcher.fetch(&source.url, source.format).await {
            Ok(payload) => payload,
            Err(e) => return failed(outcome, Stage::Fetch, &e),
        };
        transition(&mut outcome, PipelineState::Fetched);

        let artifact = match persist(
            &self.config.artifact_dir(source),
            &source.filename,
            &payload,
        )
        .await
        {
            Ok(artifact) => artifact,
            Err(e) => return failed(outcome, Stage::Persist, &e),
        };
        // Processing reads the artifact back from disk
        drop(payload);
        transition(&mut outcome, PipelineState::Persisted);

        let summary_path = self.config.summary_path(source);
        let artifact_path = artifact.path.clone();
        outcome.artifact = Some(artifact);

        if let Err(e) = self
            .processor
            .process(source.format, &artifact_path, &summary_path)
            .await
        {
            return failed(outcome, Stage::Process, &e);
        }
        outcome.summary_path = Some(summary_path);
        transition(&mut outcome, PipelineState::Summarized);

        outcome
    }
}

fn transition(outcome: &mut PipelineOutcome, to: PipelineState) {
    debug!(
        source = %outcome.name,
        format = %outcome.format,
        from = ?outcome.state,
        to = ?to,
        "pipeline transition"
    );
    outcome.state = to;
}

fn failed(mut outcome: PipelineOutcome, stage: Stage, error: &Error) -> PipelineOutcome {
    error!(
        source = %outcome.name,
        format = %outcome.format,
        %stage,
        class = ?error.class(),
        error = %error,
        "pipeline failed"
    );
    outcome.failure = Some(PipelineFailure::new(stage, error));
    transition(&mut outcome, PipelineState::Failed);
    outcome
}

/// Write `report` as indented JSON
pub async fn write_report(report: &RunReport, path: &std::path::Path) -> Result<()> {
    let value = serde_json::to_value(report)?;
    write_atomic(path, &to_pretty_json(&value)?).await
}

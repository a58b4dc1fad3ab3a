//! Configuration types for dataset-dl

use crate::error::{Error, Result};
use crate::types::SourceFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One dataset to fetch, persist and summarize
///
/// Immutable once a run starts. Paths are relative to [`Config::base_dir`] unless absolute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Short name used in logs and the run report (e.g., "txt")
    pub name: String,

    /// Dataset format, selects the fetch/persist/process variant
    pub format: SourceFormat,

    /// URL to fetch
    pub url: String,

    /// Destination folder name, combined with [`Config::folder_prefix`]
    pub folder: String,

    /// Artifact filename inside the destination folder
    pub filename: String,

    /// Where the summary report is written
    pub summary_path: PathBuf,
}

impl SourceDescriptor {
    /// Create a descriptor
    pub fn new(
        name: impl Into<String>,
        format: SourceFormat,
        url: impl Into<String>,
        folder: impl Into<String>,
        filename: impl Into<String>,
        summary_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            format,
            url: url.into(),
            folder: folder.into(),
            filename: filename.into(),
            summary_path: summary_path.into(),
        }
    }
}

/// Main configuration
///
/// `Config::default()` reproduces the four fixed sources (text, csv, spreadsheet and
/// json-records) written into `data-*` folders under the working directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root for destination folders and relative summary paths (default: ".")
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Prefix prepended to every destination folder name (default: "data-")
    #[serde(default = "default_folder_prefix")]
    pub folder_prefix: String,

    /// Sources to process, in order
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceDescriptor>,

    /// Run pipelines concurrently instead of one after another (default: false)
    #[serde(default)]
    pub concurrent: bool,

    /// Exit with a failure status when any pipeline fails (default: false)
    #[serde(default)]
    pub fail_on_pipeline_error: bool,

    /// Key holding the record list in json-records sources (default: "people")
    #[serde(default = "default_records_key")]
    pub records_key: String,

    /// Write the run report as JSON to this path (default: none)
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            folder_prefix: default_folder_prefix(),
            sources: default_sources(),
            concurrent: false,
            fail_on_pipeline_error: false,
            records_key: default_records_key(),
            report_path: None,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("invalid config file '{}': {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Full folder name for a source, with the prefix applied
    pub fn folder_name(&self, source: &SourceDescriptor) -> String {
        format!("{}{}", self.folder_prefix, source.folder)
    }

    /// Directory the artifact for `source` is written into
    pub fn artifact_dir(&self, source: &SourceDescriptor) -> PathBuf {
        self.base_dir.join(self.folder_name(source))
    }

    /// Full path of the artifact for `source`
    pub fn artifact_path(&self, source: &SourceDescriptor) -> PathBuf {
        self.artifact_dir(source).join(&source.filename)
    }

    /// Full path of the summary for `source`
    pub fn summary_path(&self, source: &SourceDescriptor) -> PathBuf {
        self.base_dir.join(&source.summary_path)
    }

    /// Check that every source is usable and that no two sources share an output path
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::config("no sources configured", "sources"));
        }
        if self.records_key.is_empty() {
            return Err(Error::config("records key must not be empty", "records_key"));
        }

        let mut artifacts = HashSet::new();
        let mut summaries = HashSet::new();

        for (i, source) in self.sources.iter().enumerate() {
            let key = |field: &str| format!("sources[{i}].{field}");

            if source.name.trim().is_empty() {
                return Err(Error::config("source name must not be empty", key("name")));
            }

            let parsed = url::Url::parse(&source.url).map_err(|e| {
                Error::config(format!("invalid URL '{}': {}", source.url, e), key("url"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::config(
                    format!("unsupported URL scheme '{}'", parsed.scheme()),
                    key("url"),
                ));
            }

            if source.folder.trim().is_empty() {
                return Err(Error::config("folder must not be empty", key("folder")));
            }
            if source.filename.is_empty()
                || source.filename.contains(['/', '\\'])
                || source.filename == "."
                || source.filename == ".."
            {
                return Err(Error::config(
                    format!("invalid artifact filename '{}'", source.filename),
                    key("filename"),
                ));
            }
            if source.summary_path.as_os_str().is_empty() {
                return Err(Error::config(
                    "summary path must not be empty",
                    key("summary_path"),
                ));
            }

            if !artifacts.insert(self.artifact_path(source)) {
                return Err(Error::config(
                    format!("artifact path for '{}' collides with another source", source.name),
                    key("filename"),
                ));
            }
            if !summaries.insert(self.summary_path(source)) {
                return Err(Error::config(
                    format!("summary path for '{}' collides with another source", source.name),
                    key("summary_path"),
                ));
            }
        }

        Ok(())
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_folder_prefix() -> String {
    "data-".to_string()
}

fn default_records_key() -> String {
    "people".to_string()
}

fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new(
            "txt",
            SourceFormat::Text,
            "https://shakespeare.mit.edu/romeo_juliet/full.html",
            "txt",
            "data.txt",
            "results_txt.txt",
        ),
        SourceDescriptor::new(
            "csv",
            SourceFormat::Csv,
            "https://raw.githubusercontent.com/MainakRepositor/Datasets/master/World%20Happiness%20Data/2020.csv",
            "csv",
            "data.csv",
            "results_csv.txt",
        ),
        SourceDescriptor::new(
            "excel",
            SourceFormat::Spreadsheet,
            "https://github.com/bharathirajatut/sample-excel-dataset/raw/master/cattle.xls",
            "excel",
            "data.xls",
            "results_xls.txt",
        ),
        SourceDescriptor::new(
            "json",
            SourceFormat::JsonRecords,
            "http://api.open-notify.org/astros.json",
            "json",
            "data.json",
            "results_json.txt",
        ),
    ]
}

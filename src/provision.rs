//! Folder provisioning
//!
//! Helpers that create folders under a base directory. Every helper is idempotent: a folder
//! that already exists is left alone and is not an error.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Creates named folders under a base directory
#[derive(Clone, Debug)]
pub struct FolderProvisioner {
    base: PathBuf,
}

impl FolderProvisioner {
    /// Provision folders under `base`
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Base directory folders are created in
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Create one folder per name, optionally lowercased and with spaces replaced by `_`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> dataset_dl::Result<()> {
    /// use dataset_dl::provision::FolderProvisioner;
    ///
    /// let provisioner = FolderProvisioner::new("data");
    /// // Creates data/north_america and data/europe
    /// provisioner
    ///     .create_folders_from_list(&["North America", "Europe"], true, true)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_folders_from_list<S: AsRef<str>>(
        &self,
        names: &[S],
        to_lowercase: bool,
        remove_spaces: bool,
    ) -> Result<Vec<PathBuf>> {
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let mut name = name.as_ref().to_string();
            if to_lowercase {
                name = name.to_lowercase();
            }
            if remove_spaces {
                name = name.replace(' ', "_");
            }
            created.push(self.create(&name).await?);
        }
        Ok(created)
    }

    /// Create `<prefix><name>` for each name
    ///
    /// The prefix is used as given, so `"data-"` and `"csv"` produce `data-csv`.
    pub async fn create_prefixed_folders<S: AsRef<str>>(
        &self,
        names: &[S],
        prefix: &str,
    ) -> Result<Vec<PathBuf>> {
        let prefixed: Vec<String> = names
            .iter()
            .map(|name| format!("{prefix}{}", name.as_ref()))
            .collect();
        self.create_folders_from_list(&prefixed, false, false).await
    }

    /// Create one folder per year from `start` to `end` inclusive
    pub async fn create_folders_for_range(&self, start: i32, end: i32) -> Result<Vec<PathBuf>> {
        let names: Vec<String> = (start..=end).map(|year| year.to_string()).collect();
        self.create_folders_from_list(&names, false, false).await
    }

    /// Create `folder_0` through `folder_{count - 1}`
    pub async fn create_numbered_folders(&self, count: usize) -> Result<Vec<PathBuf>> {
        let names: Vec<String> = (0..count).map(|i| format!("folder_{i}")).collect();
        self.create_folders_from_list(&names, false, false).await
    }

    async fn create(&self, name: &str) -> Result<PathBuf> {
        let path = self.base.join(name);
        tokio::fs::create_dir_all(&path).await.map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to create folder '{}': {}", path.display(), e),
            )
        })?;
        debug!(path = %path.display(), "folder ready");
        Ok(path)
    }
}

//! Explicit execution context for a release run.
//!
//! The invocation directory and configuration are captured once, in `main`,
//! and passed down. Nothing below reads the process working directory.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::io::config::{CONFIG_FILE, ReleaseConfig, load_config};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    /// Directory every external command runs in; expected to be the project root.
    pub root: PathBuf,
    pub config: ReleaseConfig,
}

impl ReleaseContext {
    pub fn new(root: impl Into<PathBuf>, config: ReleaseConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Build a context for `root`, reading `prepare-release.toml` there if present.
    pub fn load(root: &Path) -> Result<Self> {
        let config = load_config(&root.join(CONFIG_FILE))?;
        debug!(root = %root.display(), ?config, "loaded release context");
        Ok(Self::new(root, config))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.config.manifest)
    }
}

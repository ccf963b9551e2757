//! Git adapter for the release workflow.
//!
//! The workflow only sequences git calls; branch storage and push semantics
//! stay with git itself. Each method maps to exactly one subprocess call
//! through the [`CommandRunner`] seam, except [`Git::branch_exists`], which
//! probes the local and then the remote-tracking reference.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::core::naming::remote_ref;
use crate::io::process::{CommandRunner, Invocation};

/// Wrapper for executing git commands in a working directory.
#[derive(Debug)]
pub struct Git<'a, R: CommandRunner> {
    runner: &'a R,
    workdir: PathBuf,
}

impl<'a, R: CommandRunner> Git<'a, R> {
    pub fn new(runner: &'a R, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
        }
    }

    /// Return the current branch name as reported by `rev-parse --abbrev-ref`.
    #[instrument(skip_all)]
    pub fn current_branch(&self) -> Result<String> {
        let name = self
            .runner
            .capture(&self.git(&["rev-parse", "--abbrev-ref", "HEAD"]))?;
        debug!(branch = %name, "current branch");
        Ok(name)
    }

    /// Raw `git status --porcelain` output (empty when the tree is clean).
    pub fn status_porcelain(&self) -> Result<String> {
        self.runner.capture(&self.git(&["status", "--porcelain"]))
    }

    /// True if the working tree has no staged, unstaged, or untracked changes.
    #[instrument(skip_all)]
    pub fn is_clean(&self) -> Result<bool> {
        let status = self.status_porcelain()?;
        debug!(clean = status.is_empty(), "worktree status");
        Ok(status.is_empty())
    }

    /// True if `reference` resolves to an object.
    pub fn ref_exists(&self, reference: &str) -> Result<bool> {
        self.runner
            .probe(&self.git(&["rev-parse", "--verify", "--quiet", reference]))
    }

    /// Check whether `branch` exists locally or as `<remote>/<branch>`.
    ///
    /// The remote-tracking reference is only probed when the local one is missing.
    #[instrument(skip_all, fields(branch = %branch, remote = %remote))]
    pub fn branch_exists(&self, branch: &str, remote: &str) -> Result<bool> {
        if self.ref_exists(branch)? {
            debug!(branch, "local branch exists");
            return Ok(true);
        }
        let tracking = remote_ref(remote, branch);
        let exists = self.ref_exists(&tracking)?;
        debug!(reference = %tracking, exists, "remote-tracking branch probed");
        Ok(exists)
    }

    /// Create and checkout a new branch at current HEAD.
    #[instrument(skip_all, fields(branch = %branch))]
    pub fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "creating and checking out new branch");
        self.runner.run(&self.git(&["checkout", "-b", branch]))
    }

    /// Push `branch` to `remote` and set it as upstream.
    #[instrument(skip_all, fields(branch = %branch, remote = %remote))]
    pub fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        debug!(branch, remote, "pushing branch");
        self.runner.run(&self.git(&["push", "-u", remote, branch]))
    }

    /// Checkout an existing branch.
    #[instrument(skip_all, fields(branch = %branch))]
    pub fn checkout_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "checking out branch");
        self.runner.run(&self.git(&["checkout", branch]))
    }

    fn git(&self, args: &[&str]) -> Invocation {
        Invocation::new("git", &self.workdir).args(args.iter().copied())
    }
}

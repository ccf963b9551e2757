//! GitHub CLI (`gh`) adapter for pull-request operations.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use tracing::{debug, instrument};

use crate::io::process::{CommandRunner, Invocation};

/// Fields of a pull request to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Wrapper for executing `gh` commands in a working directory.
#[derive(Debug)]
pub struct GitHub<'a, R: CommandRunner> {
    runner: &'a R,
    workdir: PathBuf,
}

impl<'a, R: CommandRunner> GitHub<'a, R> {
    pub fn new(runner: &'a R, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
        }
    }

    /// Open a pull request from the current branch and return its URL.
    #[instrument(skip_all, fields(base = %pr.base))]
    pub fn create_pr(&self, pr: &PullRequest) -> Result<String> {
        let url = self.runner.capture(&self.gh(&[
            "pr", "create", "--base", &pr.base, "--title", &pr.title, "--body", &pr.body,
        ]))?;
        if url.is_empty() {
            return Err(anyhow!("gh pr create returned no pull request URL"));
        }
        debug!(url = %url, "pull request created");
        Ok(url)
    }

    /// Request a merge commit once the PR's required checks pass, deleting the branch afterwards.
    ///
    /// Returns as soon as the request is accepted; merge completion is not awaited.
    #[instrument(skip_all, fields(pr = %handle))]
    pub fn enable_auto_merge(&self, handle: &str) -> Result<()> {
        self.runner.run(&self.gh(&[
            "pr",
            "merge",
            handle,
            "--auto",
            "--merge",
            "--delete-branch",
        ]))
    }

    fn gh(&self, args: &[&str]) -> Invocation {
        Invocation::new("gh", &self.workdir).args(args.iter().copied())
    }
}

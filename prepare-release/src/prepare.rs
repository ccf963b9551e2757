//! Orchestration for `prepare-release`.
//!
//! After the preconditions pass and the version is resolved, the release
//! steps run strictly in order:
//!
//! 1. refuse if `release/<version>` exists locally or on the remote
//! 2. create and switch to the release branch
//! 3. push it with upstream tracking
//! 4. open a pull request against the stable branch
//! 5. request auto-merge (merge commit, delete branch)
//! 6. switch back to the source branch
//!
//! The first failing step aborts the run. Nothing is retried or rolled back,
//! so a failure after step 2 leaves the checkout on the release branch and a
//! failure after step 3 leaves the branch published.

use anyhow::{Result, bail};
use tracing::{info, instrument, warn};

use crate::context::ReleaseContext;
use crate::core::naming::{pr_body, pr_title, release_branch};
use crate::io::gh::{GitHub, PullRequest};
use crate::io::git::Git;
use crate::io::manifest::read_version;
use crate::io::process::CommandRunner;
use crate::preconditions::check_preconditions;

/// Outcome of a successful run.
///
/// Success means auto-merge was requested, not that the release was merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub version: String,
    pub branch: String,
    /// URL printed by `gh pr create`.
    pub pr_url: String,
}

/// Run the whole workflow: preconditions, version resolution, release steps.
#[instrument(skip_all, fields(root = %ctx.root.display()))]
pub fn prepare_release<R: CommandRunner>(
    ctx: &ReleaseContext,
    runner: &R,
) -> Result<ReleaseOutcome> {
    check_preconditions(ctx, runner)?;
    let version = read_version(&ctx.manifest_path(), &ctx.config.artifact)?;
    println!("Preparing release {version}");
    let outcome = publish_release(ctx, runner, &version)?;
    println!("Release {version} preparation complete.");
    Ok(outcome)
}

/// Run the mutating release steps for `version`.
///
/// Assumes the preconditions hold; see the module docs for the step order.
pub fn publish_release<R: CommandRunner>(
    ctx: &ReleaseContext,
    runner: &R,
    version: &str,
) -> Result<ReleaseOutcome> {
    let cfg = &ctx.config;
    let git = Git::new(runner, &ctx.root);
    let gh = GitHub::new(runner, &ctx.root);
    let branch = release_branch(&cfg.branch_prefix, version);

    if git.branch_exists(&branch, &cfg.remote)? {
        warn!(branch = %branch, "release branch already exists");
        bail!("release branch '{branch}' already exists");
    }

    println!("Creating branch: {branch} (from {})", cfg.source_branch);
    info!(branch = %branch, "creating release branch");
    git.checkout_new_branch(&branch)?;

    println!("Pushing branch: {branch}");
    info!(branch = %branch, remote = %cfg.remote, "publishing release branch");
    git.push_upstream(&cfg.remote, &branch)?;

    println!("Creating pull request to {}...", cfg.base_branch);
    let pr_url = gh.create_pr(&PullRequest {
        base: cfg.base_branch.clone(),
        title: pr_title(version),
        body: pr_body(version, &cfg.release_target),
    })?;
    println!("PR created: {pr_url}");
    info!(url = %pr_url, "pull request opened");

    println!("Enabling auto-merge...");
    gh.enable_auto_merge(&pr_url)?;

    info!(branch = %cfg.source_branch, "restoring source branch");
    git.checkout_branch(&cfg.source_branch)?;

    Ok(ReleaseOutcome {
        version: version.to_string(),
        branch,
        pr_url,
    })
}

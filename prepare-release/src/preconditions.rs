//! Read-only checks that must hold before the workflow mutates anything.
//!
//! Checks run in a fixed order and the first failure aborts: project root,
//! source branch, clean working tree, required tools. An earlier check gates
//! the later ones so a run from the wrong directory never reports, say, a
//! dirty tree.

use anyhow::{Result, bail};
use tracing::{debug, instrument, warn};

use crate::context::ReleaseContext;
use crate::io::git::Git;
use crate::io::process::CommandRunner;

/// Run every precondition check in order, stopping at the first failure.
#[instrument(skip_all, fields(root = %ctx.root.display()))]
pub fn check_preconditions<R: CommandRunner>(ctx: &ReleaseContext, runner: &R) -> Result<()> {
    ensure_project_root(ctx)?;
    let git = Git::new(runner, &ctx.root);
    ensure_on_branch(&git, &ctx.config.source_branch)?;
    ensure_clean_tree(&git)?;
    for tool in &ctx.config.required_tools {
        ensure_tool_available(runner, tool)?;
    }
    debug!("preconditions satisfied");
    Ok(())
}

/// Fail unless the manifest exists in the invocation directory.
pub fn ensure_project_root(ctx: &ReleaseContext) -> Result<()> {
    if !ctx.manifest_path().is_file() {
        warn!(manifest = %ctx.manifest_path().display(), "manifest missing");
        bail!(
            "not run from project root ({} missing)",
            ctx.config.manifest
        );
    }
    Ok(())
}

/// Fail unless the checkout is on `expected`.
pub fn ensure_on_branch<R: CommandRunner>(git: &Git<'_, R>, expected: &str) -> Result<()> {
    let branch = git.current_branch()?;
    if branch != expected {
        warn!(branch = %branch, expected, "wrong branch");
        bail!("must be on {expected} branch (currently on '{branch}')");
    }
    Ok(())
}

/// Fail if `git status --porcelain` reports anything at all.
pub fn ensure_clean_tree<R: CommandRunner>(git: &Git<'_, R>) -> Result<()> {
    if !git.is_clean()? {
        bail!("working tree is not clean; commit or stash changes first");
    }
    Ok(())
}

/// Fail if `tool` cannot be resolved on the search path.
pub fn ensure_tool_available<R: CommandRunner>(runner: &R, tool: &str) -> Result<()> {
    match runner.locate(tool) {
        Some(path) => {
            debug!(tool, path = %path.display(), "tool found");
            Ok(())
        }
        None => bail!("required tool '{tool}' not found on PATH"),
    }
}

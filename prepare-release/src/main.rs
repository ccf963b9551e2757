//! Prepare a release from the development branch.
//!
//! Run from the project root on a clean `develop` checkout. Creates and pushes
//! `release/<version>`, opens a pull request to `main`, and enables auto-merge.

use anyhow::{Context, Result};
use clap::Parser;
use prepare_release::context::ReleaseContext;
use prepare_release::exit_codes;
use prepare_release::io::process::{SystemRunner, join_lines};
use prepare_release::logging;
use prepare_release::prepare::prepare_release;

#[derive(Parser)]
#[command(
    name = "prepare-release",
    version,
    about = "Cut a release branch, open a PR to the stable branch, and enable auto-merge"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    logging::init();
    if let Err(err) = run() {
        eprintln!("{}", diagnostic(&err));
        std::process::exit(exit_codes::FAILED);
    }
    std::process::exit(exit_codes::OK);
}

fn run() -> Result<()> {
    let root = std::env::current_dir().context("resolve current directory")?;
    let ctx = ReleaseContext::load(&root)?;
    prepare_release(&ctx, &SystemRunner)?;
    Ok(())
}

/// The error chain as a single line.
fn diagnostic(err: &anyhow::Error) -> String {
    join_lines(&format!("{err:#}"))
}

//! Uniform execution of external commands.
//!
//! Every call to `git` or `gh` goes through [`CommandRunner`], which offers
//! three access patterns distinguished by how a non-zero exit is treated:
//!
//! - [`CommandRunner::run`]: strict execution, non-zero exit is an error.
//! - [`CommandRunner::capture`]: strict query, returns trimmed stdout.
//! - [`CommandRunner::probe`]: tolerant probe, the exit status is the answer.
//!
//! Tests substitute a scripted runner so no process is spawned.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};

/// A single external command, issued in an explicit working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            workdir: workdir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.workdir);
        cmd
    }
}

impl fmt::Display for Invocation {
    /// Space-joined program and arguments, e.g. `git push -u origin release/2.3.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Abstraction over external process execution.
pub trait CommandRunner {
    /// Run `invocation` to completion; any failure to spawn or non-zero exit is an error.
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Like [`CommandRunner::run`], but capture stdout and return it trimmed.
    fn capture(&self, invocation: &Invocation) -> Result<String>;

    /// Run `invocation` and report whether it exited successfully.
    ///
    /// A non-zero exit is a normal `false`. Only a failure to spawn is an error.
    fn probe(&self, invocation: &Invocation) -> Result<bool>;

    /// Resolve `program` on the execution search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %invocation))]
    fn run(&self, invocation: &Invocation) -> Result<()> {
        debug!("spawning child process");
        let status = invocation
            .command()
            .status()
            .map_err(|e| {
                error!(err = %e, "failed to spawn command");
                e
            })
            .with_context(|| format!("spawn {invocation}"))?;
        if !status.success() {
            warn!(exit_code = ?status.code(), "command failed");
            return Err(anyhow!(
                "{invocation} failed with status {}",
                describe_code(status.code())
            ));
        }
        debug!("command finished");
        Ok(())
    }

    #[instrument(skip_all, fields(command = %invocation))]
    fn capture(&self, invocation: &Invocation) -> Result<String> {
        debug!("spawning child process");
        let output = invocation
            .command()
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawn {invocation}"))?;
        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "command failed");
            return Err(anyhow!(
                "{invocation} failed with status {}: {}",
                describe_code(output.status.code()),
                join_lines(&String::from_utf8_lossy(&output.stderr))
            ));
        }
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(stdout_len = stdout.len(), "command finished");
        Ok(stdout)
    }

    #[instrument(skip_all, fields(command = %invocation))]
    fn probe(&self, invocation: &Invocation) -> Result<bool> {
        let status = invocation
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("spawn {invocation}"))?;
        debug!(exit_code = ?status.code(), "probe finished");
        Ok(status.success())
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// Collapse multi-line tool output into one `; `-separated line.
pub fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

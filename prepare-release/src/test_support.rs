//! Test-only helpers: a scripted command runner and throwaway git repositories.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::process::{CommandRunner, Invocation};

/// [`CommandRunner`] that answers from a script and records every call.
///
/// Commands are keyed by their display form (`git checkout -b release/1.0.0`).
/// Unscripted queries return empty stdout, unscripted probes return `false`,
/// and every tool is found unless marked missing.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    captures: HashMap<String, String>,
    probes: HashMap<String, bool>,
    failures: HashSet<String>,
    missing_tools: HashSet<String>,
    recorded: RefCell<Vec<Invocation>>,
    located: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner for a checkout on `branch` with a clean working tree.
    pub fn on_clean_branch(branch: &str) -> Self {
        Self::new().capture_output("git rev-parse --abbrev-ref HEAD", branch)
    }

    /// Script stdout for a strict query.
    pub fn capture_output(mut self, command: &str, stdout: &str) -> Self {
        self.captures.insert(command.to_string(), stdout.to_string());
        self
    }

    /// Script the answer of a tolerant probe.
    pub fn probe_result(mut self, command: &str, exists: bool) -> Self {
        self.probes.insert(command.to_string(), exists);
        self
    }

    /// Make a strict execution or query exit non-zero.
    pub fn fail(mut self, command: &str) -> Self {
        self.failures.insert(command.to_string());
        self
    }

    /// Make `program` unresolvable on the search path.
    pub fn missing_tool(mut self, program: &str) -> Self {
        self.missing_tools.insert(program.to_string());
        self
    }

    /// Every subprocess call issued so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.recorded.borrow().clone()
    }

    /// Display form of every subprocess call issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.recorded.borrow().iter().map(ToString::to_string).collect()
    }

    /// Programs looked up on the search path, in order.
    pub fn located(&self) -> Vec<String> {
        self.located.borrow().clone()
    }

    fn record(&self, invocation: &Invocation) -> Result<String> {
        self.recorded.borrow_mut().push(invocation.clone());
        let key = invocation.to_string();
        if self.failures.contains(&key) {
            return Err(anyhow!("{key} failed with status 1"));
        }
        Ok(key)
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.record(invocation).map(|_| ())
    }

    fn capture(&self, invocation: &Invocation) -> Result<String> {
        let key = self.record(invocation)?;
        Ok(self.captures.get(&key).cloned().unwrap_or_default())
    }

    fn probe(&self, invocation: &Invocation) -> Result<bool> {
        self.recorded.borrow_mut().push(invocation.clone());
        Ok(self
            .probes
            .get(&invocation.to_string())
            .copied()
            .unwrap_or(false))
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.located.borrow_mut().push(program.to_string());
        if self.missing_tools.contains(program) {
            return None;
        }
        Some(PathBuf::from("/usr/bin").join(program))
    }
}

/// Minimal Maven manifest declaring `artifact` at `version`.
pub fn pom_xml(artifact: &str, version: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <project>\n  \
           <modelVersion>4.0.0</modelVersion>\n  \
           <groupId>io.github.example</groupId>\n  \
           <artifactId>{artifact}</artifactId>\n  \
           <version>{version}</version>\n\
         </project>\n"
    )
}

/// Throwaway git repository on a `develop` branch with one commit.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Initialise a repository containing `files` (path, contents) committed on `develop`.
    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp repo")?;
        let repo = Self { dir };
        repo.git(&["init", "--quiet"])?;
        repo.git(&["checkout", "--quiet", "-b", "develop"])?;
        repo.git(&["config", "user.name", "Release Test"])?;
        repo.git(&["config", "user.email", "release-test@example.com"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        for (path, contents) in files {
            repo.write(path, contents)?;
        }
        repo.git(&["add", "-A"])?;
        repo.git(&["commit", "--quiet", "--allow-empty", "-m", "initial"])?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, path: &str, contents: &str) -> Result<()> {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&full, contents).with_context(|| format!("write {}", full.display()))
    }

    /// Run git in the repository and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let out = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))?;
        if !out.status.success() {
            return Err(anyhow!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&out.stderr).trim()
            ));
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}

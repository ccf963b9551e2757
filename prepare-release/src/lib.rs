//! Release preparation for trunk-based projects.
//!
//! Cuts `release/<version>` from the development branch, publishes it, opens a
//! pull request against the stable branch and requests auto-merge. The crate
//! keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (version pattern, names, PR text).
//! - **[`io`]**: Side-effecting adapters (process execution, git, `gh`, files).
//!   All subprocesses go through [`io::process::CommandRunner`] so tests can
//!   substitute a scripted runner.
//!
//! Orchestration modules ([`preconditions`], [`prepare`]) combine the two.

pub mod context;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod preconditions;
pub mod prepare;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

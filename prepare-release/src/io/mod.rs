//! I/O adapters for the release workflow.

pub mod config;
pub mod gh;
pub mod git;
pub mod manifest;
pub mod process;

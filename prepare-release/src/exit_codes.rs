//! Stable exit codes for the `prepare-release` binary.

/// Release branch created, PR opened and auto-merge requested.
pub const OK: i32 = 0;
/// A precondition, version lookup, conflict check or release step failed.
pub const FAILED: i32 = 1;

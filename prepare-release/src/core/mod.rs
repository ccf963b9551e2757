//! Deterministic, pure logic shared by the release workflow.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! text and names and return deterministic outputs suitable for tests.

pub mod naming;
pub mod version;

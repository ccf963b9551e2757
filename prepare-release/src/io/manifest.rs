//! Reading the project manifest and resolving the release version.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::version::extract_version;

/// Read `path` and return the version declared for `artifact`.
///
/// Fails if the file cannot be read or the artifact/version pattern is absent.
pub fn read_version(path: &Path, artifact: &str) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let version = extract_version(&text, artifact)?.ok_or_else(|| {
        anyhow!(
            "could not find version for artifact '{artifact}' in {}",
            file_label(path)
        )
    })?;
    debug!(artifact, version = %version, "resolved version");
    Ok(version)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

//! Version extraction from raw manifest text.
//!
//! The manifest is never parsed as a structured document. The version is the
//! text captured by a literal pattern: the artifact's `<artifactId>` element
//! immediately followed (whitespace aside) by a `<version>` element.

use anyhow::{Context, Result};
use regex::Regex;

/// Build the artifact/version pattern for `artifact`.
///
/// The artifact name is matched literally, so names containing regex
/// metacharacters (`.`, `+`) are safe.
pub fn version_pattern(artifact: &str) -> Result<Regex> {
    let pattern = format!(
        r"<artifactId>{}</artifactId>\s*<version>([^<]+)</version>",
        regex::escape(artifact)
    );
    Regex::new(&pattern).with_context(|| format!("compile version pattern for '{artifact}'"))
}

/// Return the version captured for `artifact`, or `None` if the pattern is absent.
///
/// The first match in document order wins. The captured text is returned
/// verbatim, without trimming or format checks.
pub fn extract_version(text: &str, artifact: &str) -> Result<Option<String>> {
    let pattern = version_pattern(artifact)?;
    Ok(pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string()))
}

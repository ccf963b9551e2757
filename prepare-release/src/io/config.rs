//! Release configuration stored in `prepare-release.toml` at the project root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// File name of the optional configuration file.
pub const CONFIG_FILE: &str = "prepare-release.toml";

/// Release configuration (TOML).
///
/// Every field only renames something the workflow touches; the order of the
/// workflow steps is fixed. Missing fields take the defaults below.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Manifest file, relative to the project root, holding the version.
    pub manifest: String,

    /// Artifact whose `<version>` names the release.
    pub artifact: String,

    /// Development branch releases are cut from and returned to.
    pub source_branch: String,

    /// Stable branch the release pull request targets.
    pub base_branch: String,

    /// Remote the release branch is published to.
    pub remote: String,

    /// Prefix joined with the version to name the release branch.
    pub branch_prefix: String,

    /// Tools that must be resolvable on `PATH`, checked in order.
    pub required_tools: Vec<String>,

    /// Where the release goes, named in the pull-request summary.
    pub release_target: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            manifest: "pom.xml".to_string(),
            artifact: "mq-rest-admin".to_string(),
            source_branch: "develop".to_string(),
            base_branch: "main".to_string(),
            remote: "origin".to_string(),
            branch_prefix: "release/".to_string(),
            required_tools: vec!["gh".to_string()],
            release_target: "Maven Central".to_string(),
        }
    }
}

impl ReleaseConfig {
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("manifest", &self.manifest),
            ("artifact", &self.artifact),
            ("source_branch", &self.source_branch),
            ("base_branch", &self.base_branch),
            ("remote", &self.remote),
            ("branch_prefix", &self.branch_prefix),
            ("release_target", &self.release_target),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(anyhow!("{field} must not be empty"));
            }
        }
        if !self.branch_prefix.ends_with('/') {
            return Err(anyhow!("branch_prefix must end with '/'"));
        }
        if self.source_branch == self.base_branch {
            return Err(anyhow!("source_branch and base_branch must differ"));
        }
        if self.required_tools.is_empty() || self.required_tools.iter().any(|t| t.trim().is_empty())
        {
            return Err(anyhow!("required_tools must be a non-empty array of names"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ReleaseConfig::default()`.
pub fn load_config(path: &Path) -> Result<ReleaseConfig> {
    if !path.exists() {
        let cfg = ReleaseConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ReleaseConfig = toml::from_str(&contents)
        .map_err(|e| anyhow!(describe_parse_error(&contents, &e)))
        .with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid {}", path.display()))?;
    Ok(cfg)
}

/// Single-line form of a TOML error: the message plus where it happened.
fn describe_parse_error(contents: &str, err: &toml::de::Error) -> String {
    let message = err.message().trim().replace('\n', "; ");
    match err.span() {
        Some(span) => {
            let before = &contents[..span.start.min(contents.len())];
            let line = before.matches('\n').count() + 1;
            let column = before.len() - before.rfind('\n').map_or(0, |i| i + 1) + 1;
            format!("{message} at line {line}, column {column}")
        }
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join(CONFIG_FILE)).expect("load");
        assert_eq!(cfg, ReleaseConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "artifact = \"widget-core\"\nremote = \"upstream\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.artifact, "widget-core");
        assert_eq!(cfg.remote, "upstream");
        assert_eq!(cfg.source_branch, "develop");
        assert_eq!(cfg.required_tools, vec!["gh".to_string()]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "steps = [\"push\"]\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse"));
    }

    #[test]
    fn malformed_file_reports_position_on_one_line() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "remote = \"origin\"\nmanifest = \n").expect("write");
        let err = load_config(&path).unwrap_err();
        let rendered = format!("{err:#}");
        assert_eq!(rendered.lines().count(), 1, "{rendered}");
        assert!(rendered.contains("at line 2"), "{rendered}");
    }

    #[test]
    fn validate_rejects_same_source_and_base() {
        let cfg = ReleaseConfig {
            base_branch: "develop".to_string(),
            ..ReleaseConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn validate_rejects_prefix_without_separator() {
        let cfg = ReleaseConfig {
            branch_prefix: "release".to_string(),
            ..ReleaseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_tool_list() {
        let cfg = ReleaseConfig {
            required_tools: Vec::new(),
            ..ReleaseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}

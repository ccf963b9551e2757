//! Names and texts derived from the release version.

/// Marker identifying this tool in generated pull-request bodies.
pub const PROVENANCE: &str = "Generated with `prepare-release`";

/// Release branch name: `<prefix><version>` (e.g. `release/2.3.0`).
pub fn release_branch(prefix: &str, version: &str) -> String {
    format!("{prefix}{version}")
}

/// Remote-tracking reference for `branch` on `remote` (e.g. `origin/release/2.3.0`).
pub fn remote_ref(remote: &str, branch: &str) -> String {
    format!("{remote}/{branch}")
}

/// Pull-request title for a release.
pub fn pr_title(version: &str) -> String {
    format!("release: {version}")
}

/// Pull-request body: a summary naming the version and target, then the provenance marker.
pub fn pr_body(version: &str, release_target: &str) -> String {
    format!("## Summary\n- Release {version} to {release_target}\n\n{PROVENANCE}\n")
}

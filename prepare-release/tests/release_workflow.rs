//! Workflow scenarios driven through a scripted command runner.
//!
//! Each test builds a project directory with a real manifest, scripts the
//! answers of `git` and `gh`, and asserts the exact sequence of external
//! calls the workflow issues.

use std::fs;

use prepare_release::context::ReleaseContext;
use prepare_release::io::config::ReleaseConfig;
use prepare_release::prepare::prepare_release;
use prepare_release::test_support::{ScriptedRunner, pom_xml};
use tempfile::TempDir;

const CURRENT_BRANCH: &str = "git rev-parse --abbrev-ref HEAD";
const STATUS: &str = "git status --porcelain";

fn project(version: &str) -> (TempDir, ReleaseContext) {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("pom.xml"), pom_xml("mq-rest-admin", version)).expect("write pom");
    let ctx = ReleaseContext::new(temp.path(), ReleaseConfig::default());
    (temp, ctx)
}

fn pr_create(version: &str) -> String {
    format!(
        "gh pr create --base main --title release: {version} --body ## Summary\n\
         - Release {version} to Maven Central\n\nGenerated with `prepare-release`\n"
    )
}

/// Happy path: every step runs once, in order, ending back on develop.
#[test]
fn happy_path_issues_full_sequence() {
    let (_temp, ctx) = project("2.3.0");
    let url = "https://github.com/example/mq-rest-admin/pull/42";
    let runner = ScriptedRunner::on_clean_branch("develop").capture_output(&pr_create("2.3.0"), url);

    let outcome = prepare_release(&ctx, &runner).expect("prepare release");

    assert_eq!(outcome.version, "2.3.0");
    assert_eq!(outcome.branch, "release/2.3.0");
    assert_eq!(outcome.pr_url, url);
    assert_eq!(
        runner.calls(),
        vec![
            CURRENT_BRANCH.to_string(),
            STATUS.to_string(),
            "git rev-parse --verify --quiet release/2.3.0".to_string(),
            "git rev-parse --verify --quiet origin/release/2.3.0".to_string(),
            "git checkout -b release/2.3.0".to_string(),
            "git push -u origin release/2.3.0".to_string(),
            pr_create("2.3.0"),
            format!("gh pr merge {url} --auto --merge --delete-branch"),
            "git checkout develop".to_string(),
        ]
    );
    assert_eq!(runner.located(), vec!["gh"]);

    let pr = &runner.invocations()[6];
    assert_eq!(pr.args[3], "main");
    assert_eq!(pr.args[5], "release: 2.3.0");
    assert!(pr.args[7].contains("Release 2.3.0"));
    assert!(pr.args[7].contains("Generated with `prepare-release`"));
    assert!(runner.invocations().iter().all(|inv| inv.workdir == ctx.root));
}

/// A dirty tree stops the run before any branch operation.
#[test]
fn dirty_tree_aborts_before_branch_operations() {
    let (_temp, ctx) = project("2.3.0");
    let runner = ScriptedRunner::on_clean_branch("develop").capture_output(STATUS, " M pom.xml");

    let err = prepare_release(&ctx, &runner).unwrap_err();

    assert!(err.to_string().contains("not clean"));
    assert_eq!(runner.calls(), vec![CURRENT_BRANCH, STATUS]);
}

/// A release branch on the remote is a conflict: no create, push or PR call.
#[test]
fn existing_remote_release_branch_aborts() {
    let (_temp, ctx) = project("1.0.0");
    let runner = ScriptedRunner::on_clean_branch("develop")
        .probe_result("git rev-parse --verify --quiet origin/release/1.0.0", true);

    let err = prepare_release(&ctx, &runner).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    let calls = runner.calls();
    assert!(!calls.iter().any(|c| c.starts_with("git checkout")));
    assert!(!calls.iter().any(|c| c.starts_with("git push")));
    assert!(!calls.iter().any(|c| c.starts_with("gh ")));
}

/// A failed push leaves the checkout on the release branch and opens no PR.
#[test]
fn push_failure_stops_before_pull_request() {
    let (_temp, ctx) = project("2.3.0");
    let runner = ScriptedRunner::on_clean_branch("develop").fail("git push -u origin release/2.3.0");

    let err = prepare_release(&ctx, &runner).unwrap_err();

    assert!(err.to_string().contains("git push -u origin release/2.3.0 failed"));
    let calls = runner.calls();
    assert_eq!(calls.last().map(String::as_str), Some("git push -u origin release/2.3.0"));
    assert!(!calls.iter().any(|c| c.starts_with("gh ")));
    assert!(!calls.contains(&"git checkout develop".to_string()));
}

/// A PR-creation failure means no auto-merge request.
#[test]
fn pr_failure_skips_auto_merge() {
    let (_temp, ctx) = project("2.3.0");
    let runner = ScriptedRunner::on_clean_branch("develop").fail(&pr_create("2.3.0"));

    assert!(prepare_release(&ctx, &runner).is_err());
    assert!(!runner.calls().iter().any(|c| c.starts_with("gh pr merge")));
}

/// Without the artifact/version pattern nothing past the preconditions runs.
#[test]
fn unresolved_version_aborts_before_mutation() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("pom.xml"), pom_xml("some-other-lib", "5.0.0")).expect("write pom");
    let ctx = ReleaseContext::new(temp.path(), ReleaseConfig::default());
    let runner = ScriptedRunner::on_clean_branch("develop");

    let err = prepare_release(&ctx, &runner).unwrap_err();

    assert_eq!(
        err.to_string(),
        "could not find version for artifact 'mq-rest-admin' in pom.xml"
    );
    assert_eq!(runner.calls(), vec![CURRENT_BRANCH, STATUS]);
}

/// Running outside the project root reports only that, never tree state.
#[test]
fn project_root_check_precedes_everything() {
    let temp = tempfile::tempdir().expect("tempdir");
    let ctx = ReleaseContext::new(temp.path(), ReleaseConfig::default());
    let runner = ScriptedRunner::on_clean_branch("main").capture_output(STATUS, "?? junk");

    let err = prepare_release(&ctx, &runner).unwrap_err();

    assert!(err.to_string().contains("not run from project root"));
    assert!(runner.calls().is_empty());
}

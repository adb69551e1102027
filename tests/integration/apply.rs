//! End-to-end convergence through the apply command

use matryoshka::commands::apply::{run, ApplyOptions};
use matryoshka::graph::Status;
use matryoshka::walk::WalkError;

use super::helpers::*;

#[test]
fn test_apply_remediates_and_converges() {
    let temp_dir = deps_dir("");
    let flag = marker(temp_dir.path(), "installed");
    std::fs::write(temp_dir.path().join("main.yaml"), marker_manifest(&flag)).unwrap();

    let out = Captured::default();
    let outcome = run(temp_dir.path(), &ApplyOptions::default(), out.clone()).unwrap();

    assert!(outcome.succeeded());
    assert_eq!(outcome.dep, "all");
    assert!(flag.exists());
    assert_eq!(out.text(), "all {\n  tool {\n  } tool ✔\n} all ✔\n");
}

#[test]
fn test_apply_dry_run_changes_nothing() {
    let temp_dir = deps_dir("");
    let flag = marker(temp_dir.path(), "installed");
    std::fs::write(temp_dir.path().join("main.yaml"), marker_manifest(&flag)).unwrap();

    let options = ApplyOptions {
        dry_run: true,
        ..Default::default()
    };
    let out = Captured::default();
    let outcome = run(temp_dir.path(), &options, out.clone()).unwrap();

    assert!(!outcome.succeeded());
    assert_eq!(outcome.status, Status::Unsatisfied);
    assert!(!flag.exists());
    assert!(outcome.remediation_errors.is_empty());
    assert!(out.text().contains("} tool ✖"));
}

#[test]
fn test_apply_already_met_runs_no_remediation() {
    let temp_dir = deps_dir("");
    let flag = marker(temp_dir.path(), "installed");
    let remediated = marker(temp_dir.path(), "remediated");
    std::fs::write(&flag, "").unwrap();
    let manifest = format!(
        r#"
dependencies:
  - name: all
    met: ["test -f '{flag}'"]
    meet: ["touch '{remediated}'"]
"#,
        flag = flag.display(),
        remediated = remediated.display()
    );
    std::fs::write(temp_dir.path().join("main.yaml"), manifest).unwrap();

    let outcome = run(temp_dir.path(), &ApplyOptions::default(), Captured::default()).unwrap();

    assert!(outcome.succeeded());
    assert!(!remediated.exists());
}

#[test]
fn test_apply_collects_remediation_failure() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
    requires: [broken, fine]
  - name: broken
    met: ["false"]
    meet: ["exit 7", "true"]
  - name: fine
    met: ["true"]
"#,
    );

    let out = Captured::default();
    let outcome = run(temp_dir.path(), &ApplyOptions::default(), out.clone()).unwrap();

    assert!(!outcome.succeeded());
    assert!(outcome.walk_error.is_none());
    assert_eq!(outcome.status, Status::Unsatisfied);
    assert_eq!(outcome.remediation_errors.len(), 1);

    let message = outcome.remediation_errors[0].to_string();
    assert!(message.contains("remediate action"));
    assert!(message.contains("status 7"));
    assert!(out.text().contains("} broken ✖"));
    assert!(out.text().contains("} fine ✔"));
}

#[test]
fn test_apply_explicit_dep() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
    requires: [broken]
  - name: broken
    met: ["false"]
  - name: fine
    met: ["true"]
"#,
    );

    let options = ApplyOptions {
        dep: Some("fine".to_string()),
        ..Default::default()
    };
    let out = Captured::default();
    let outcome = run(temp_dir.path(), &options, out.clone()).unwrap();

    assert!(outcome.succeeded());
    assert_eq!(out.text(), "fine {\n} fine ✔\n");
}

#[test]
fn test_apply_default_dep_from_settings() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: everything
    met: ["true"]
"#,
    );
    write_settings(temp_dir.path(), "[defaults]\ndep = \"everything\"\n");

    let outcome = run(temp_dir.path(), &ApplyOptions::default(), Captured::default()).unwrap();

    assert_eq!(outcome.dep, "everything");
    assert!(outcome.succeeded());
}

#[test]
fn test_apply_unknown_dep_fails_before_walking() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
"#,
    );

    let options = ApplyOptions {
        dep: Some("nope".to_string()),
        ..Default::default()
    };
    let err = run(temp_dir.path(), &options, Captured::default()).unwrap_err();

    assert!(err.to_string().contains("'nope' not found"));
}

#[test]
fn test_apply_reports_cycle() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
    requires: [chicken]
  - name: chicken
    requires: [egg]
  - name: egg
    requires: [chicken]
"#,
    );

    let outcome = run(temp_dir.path(), &ApplyOptions::default(), Captured::default()).unwrap();

    let error = outcome.walk_error.expect("expected a cycle");
    assert!(error.is_cycle());
    assert_eq!(error.path(), vec!["chicken", "egg", "chicken"]);
    assert!(matches!(error.root(), WalkError::CycleDetected { name } if name == "chicken"));
}

#[test]
fn test_apply_skips_disabled_requirement() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
    requires: [wanted, unwanted]
  - name: wanted
    met: ["true"]
  - name: unwanted
    enabled: false
    met: ["false"]
"#,
    );

    let out = Captured::default();
    let outcome = run(temp_dir.path(), &ApplyOptions::default(), out.clone()).unwrap();

    assert!(outcome.succeeded());
    assert!(!out.text().contains("unwanted"));
}

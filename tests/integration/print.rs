//! Check-only walks through the print command

use matryoshka::commands::print::run;
use matryoshka::graph::Status;
use serial_test::serial;

use super::helpers::*;

#[test]
fn test_print_never_remediates() {
    let temp_dir = deps_dir("");
    let flag = marker(temp_dir.path(), "installed");
    std::fs::write(temp_dir.path().join("main.yaml"), marker_manifest(&flag)).unwrap();

    let out = Captured::default();
    let status = run(temp_dir.path(), None, false, out.clone()).unwrap();

    assert_eq!(status, Status::Unsatisfied);
    assert!(!flag.exists());
    assert_eq!(out.text(), "all {\n  tool {\n  } tool ✖\n} all ✖\n");
}

#[test]
fn test_print_reports_current_truth() {
    let temp_dir = deps_dir("");
    let flag = marker(temp_dir.path(), "installed");
    std::fs::write(&flag, "").unwrap();
    std::fs::write(temp_dir.path().join("main.yaml"), marker_manifest(&flag)).unwrap();

    let out = Captured::default();
    let status = run(temp_dir.path(), None, false, out.clone()).unwrap();

    assert_eq!(status, Status::Satisfied);
    assert_eq!(out.text(), "all {\n  tool {\n  } tool ✔\n} all ✔\n");
}

#[test]
fn test_print_shared_requirement_printed_per_parent() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
    requires: [left, right]
  - name: left
    requires: [base]
  - name: right
    requires: [base]
  - name: base
    met: ["true"]
"#,
    );

    let out = Captured::default();
    run(temp_dir.path(), None, false, out.clone()).unwrap();

    let text = out.text();
    assert_eq!(text.matches("base {").count(), 2);
    assert!(text.ends_with("} all ✔\n"));
}

#[test]
fn test_print_missing_manifest() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let err = run(temp_dir.path(), None, false, Captured::default()).unwrap_err();

    assert!(err.to_string().contains("main.yaml not found"));
}

#[test]
#[serial]
fn test_print_with_color() {
    colored::control::set_override(true);
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
    met: ["true"]
"#,
    );

    let out = Captured::default();
    run(temp_dir.path(), None, true, out.clone()).unwrap();
    colored::control::unset_override();

    assert_eq!(out.text(), "all {\n} all \u{1b}[32m✔\u{1b}[0m\n");
}

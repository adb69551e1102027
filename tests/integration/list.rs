//! Listing dependencies

use matryoshka::commands::list::{entries, Entry};

use super::helpers::*;

#[test]
fn test_list_sorted_with_requirements() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: zsh
    requires: [brew]
  - name: all
    requires: [zsh, git]
  - name: git
    description: "version control"
    requires: [brew]
  - name: brew
"#,
    );

    let entries = entries(temp_dir.path()).unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["all", "brew", "git", "zsh"]);
    assert_eq!(entries[0].requires, vec!["zsh", "git"]);
    assert_eq!(
        entries[2],
        Entry {
            name: "git".to_string(),
            description: Some("version control".to_string()),
            requires: vec!["brew".to_string()],
        }
    );
}

#[test]
fn test_list_excludes_disabled() {
    let temp_dir = deps_dir(
        r#"
dependencies:
  - name: all
    requires: [wanted, unwanted]
  - name: wanted
  - name: unwanted
    enabled: false
"#,
    );

    let entries = entries(temp_dir.path()).unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["all", "wanted"]);
    assert_eq!(entries[0].requires, vec!["wanted"]);
}

#[test]
fn test_list_entry_json_shape() {
    let entry = Entry {
        name: "git".to_string(),
        description: None,
        requires: vec!["brew".to_string()],
    };

    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json, serde_json::json!({"name": "git", "requires": ["brew"]}));
}

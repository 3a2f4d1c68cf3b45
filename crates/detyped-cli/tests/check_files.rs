//! # Check Subcommand Against Files
//!
//! Drives the check handler through real documents in a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use detyped_cli::check::{run_check, CheckArgs};

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

const COLORS: &str = r#"{"kind": "enum", "type_name": "Color", "description": "Colors", "values": ["RED", "GREEN"]}"#;

const COLORS_YAML: &str = "kind: enum\ntype_name: Color\ndescription: Colors\nvalues: [RED, GREEN]\n";

#[test]
fn reports_instance() {
    let dir = tempfile::tempdir().unwrap();
    let args = CheckArgs {
        type_path: write(dir.path(), "color.yaml", COLORS_YAML),
        value: write(dir.path(), "value.json", r#"{"text": "RED"}"#),
        allow_list: None,
    };
    let mut out = Vec::new();
    assert_eq!(run_check(&args, &mut out).unwrap(), 0);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains(" is an instance of EnumMetaType{type=Color"));
}

#[test]
fn reports_non_instance() {
    let dir = tempfile::tempdir().unwrap();
    let args = CheckArgs {
        type_path: write(dir.path(), "color.json", COLORS),
        value: write(dir.path(), "value.json", r#"{"text": "BLUE"}"#),
        allow_list: None,
    };
    let mut out = Vec::new();
    assert_eq!(run_check(&args, &mut out).unwrap(), 1);
    assert!(String::from_utf8(out).unwrap().contains("is NOT an instance"));
}

#[test]
fn custom_allow_list_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let money = r#"{"kind": "array", "dimension": 1, "element": {"kind": "simple", "class_name": "Money"}}"#;
    let type_path = write(dir.path(), "money.json", money);
    let value = write(dir.path(), "value.json", r#"{"list": []}"#);

    let without = CheckArgs {
        type_path: type_path.clone(),
        value: value.clone(),
        allow_list: None,
    };
    let err = run_check(&without, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("Money"));

    let with = CheckArgs {
        type_path,
        value,
        allow_list: Some(write(dir.path(), "allow.yaml", "classes:\n  - Money\n")),
    };
    assert_eq!(run_check(&with, &mut Vec::new()).unwrap(), 0);
}

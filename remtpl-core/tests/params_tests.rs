//! Args-file and variable parsing tests for `remtpl-core`.
//!
//! Each `#[case]` gets an isolated `TempDir`.

use remtpl_core::{load_args_file, load_vars_file, parse_var_assignment, ConfigError};
use rstest::rstest;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn write(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let path = dir.path().join(filename);
    fs::write(&path, content).expect("write fixture");
    path
}

// ---------------------------------------------------------------------------
// Args files
// ---------------------------------------------------------------------------

#[rstest]
#[case(
    "args.yaml",
    "url: http://192.168.0.11/test.tmpl\ndest: /tmp/test.txt\nusername: admin\npassword: 123456\nvars:\n  name: zhangsan\n"
)]
#[case(
    "args.json",
    r#"{"url": "http://192.168.0.11/test.tmpl", "dest": "/tmp/test.txt", "username": "admin", "password": "123456", "vars": {"name": "zhangsan"}}"#
)]
#[case(
    "wrapped.json",
    r#"{"ANSIBLE_MODULE_ARGS": {"url": "http://192.168.0.11/test.tmpl", "dest": "/tmp/test.txt", "username": "admin", "password": 123456, "vars": {"name": "zhangsan"}}}"#
)]
fn full_args_file_validates(#[case] filename: &str, #[case] content: &str) {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, filename, content);

    let (cfg, mode) = load_args_file(&path)
        .expect("load")
        .validate()
        .expect("validate");

    assert_eq!(cfg.url.as_str(), "http://192.168.0.11/test.tmpl");
    assert_eq!(cfg.dest, PathBuf::from("/tmp/test.txt"));
    let creds = cfg.credentials.expect("credentials");
    assert_eq!(creds.username, "admin");
    assert_eq!(creds.password.expose(), "123456");
    assert_eq!(cfg.vars.get("name"), Some(&json!("zhangsan")));
    assert!(!mode.check);
    assert!(!mode.diff);
}

#[test]
fn required_only_args_file_validates() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        &dir,
        "args.yaml",
        "url: http://192.168.0.11/test.tmpl\ndest: /tmp/test.txt\n",
    );
    let (cfg, _) = load_args_file(&path).unwrap().validate().unwrap();
    assert!(cfg.credentials.is_none());
    assert!(cfg.vars.is_empty());
}

#[test]
fn malformed_args_file_reports_parse_error_with_path() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "args.yaml", "url: [unterminated\n");
    let err = load_args_file(&path).unwrap_err();
    match err {
        ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[rstest]
#[case(
    "wrapped.json",
    r#"{"ANSIBLE_MODULE_ARGS": {"url": ["http://h/t"], "dest": "/tmp/x"}}"#
)]
#[case(
    "wrapped.yaml",
    "ANSIBLE_MODULE_ARGS:\n  url: http://h/t\n  dest: /tmp/x\n  _ansible_check_mode: maybe\n"
)]
#[case("bare.yaml", "url:\n  nested: http://h/t\ndest: /tmp/x\n")]
fn bad_field_is_a_parse_error_naming_the_file(#[case] filename: &str, #[case] content: &str) {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, filename, content);
    match load_args_file(&path) {
        Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn empty_args_file_yields_no_params() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "args.yaml", "");
    let params = load_args_file(&path).expect("empty file loads");
    assert!(params.url.is_none());
    assert!(params.dest.is_none());
}

#[test]
fn invalid_url_is_a_config_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "args.yaml", "url: not a url\ndest: /tmp/x\n");
    let err = load_args_file(&path).unwrap().validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
}

// ---------------------------------------------------------------------------
// Vars
// ---------------------------------------------------------------------------

#[test]
fn vars_file_accepts_nested_values() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        &dir,
        "vars.yaml",
        "name: Ann\nports:\n  - 80\n  - 443\nlimits:\n  cpu: 2\n",
    );
    let vars = load_vars_file(&path).expect("vars");
    assert_eq!(vars.get("ports"), Some(&json!([80, 443])));
    assert_eq!(vars.get("limits"), Some(&json!({"cpu": 2})));
}

#[test]
fn vars_file_rejects_non_mapping() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "vars.yaml", "- a\n- b\n");
    let err = load_vars_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::VarsNotMapping { .. }));
}

#[rstest]
#[case("name=Ann", "name", json!("Ann"))]
#[case("port=8080", "port", json!(8080))]
#[case("debug=true", "debug", json!(true))]
#[case("empty=", "empty", json!(""))]
#[case("greeting=a=b", "greeting", json!("a=b"))]
#[case("list=[1, 2]", "list", json!([1, 2]))]
fn var_assignments_parse_as_yaml_scalars(
    #[case] input: &str,
    #[case] key: &str,
    #[case] expected: Value,
) {
    let (k, v) = parse_var_assignment(input).expect("parse");
    assert_eq!(k, key);
    assert_eq!(v, expected);
}

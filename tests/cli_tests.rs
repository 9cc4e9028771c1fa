#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Runs the compiled binaries the way a user would.

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("cli_test_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn towerstats(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_towerstats"))
        .current_dir(dir)
        .env_remove("TOWERSTATS_DATA")
        .env("TOWERSTATS_LOG_LEVEL", "error")
        .args(args)
        .output()
        .expect("run towerstats")
}

fn towerstats_gen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_towerstats-gen"))
        .current_dir(dir)
        .env("TOWERSTATS_LOG_LEVEL", "error")
        .args(args)
        .output()
        .expect("run towerstats-gen")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_tower_query_uses_sample_data_without_a_document() {
    let dir = temp_dir();
    let output = towerstats(&dir, &["tower", "dart_monkey"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["cost_medium"], 200);
}

#[test]
fn test_data_flag_selects_document() {
    let dir = temp_dir();
    let data = fixture("mini_catalog.yaml");
    let output = towerstats(&dir, &["--data", data.to_str().unwrap(), "heroes"]);
    assert!(output.status.success());
    let heroes = stdout_json(&output);
    assert_eq!(heroes.as_array().unwrap().len(), 2);
    assert_eq!(heroes[1]["id"], "obyn_greenfoot");
}

#[test]
fn test_env_var_selects_document() {
    let dir = temp_dir();
    let output = Command::new(env!("CARGO_BIN_EXE_towerstats"))
        .current_dir(&dir)
        .env("TOWERSTATS_DATA", fixture("mini_catalog.json"))
        .env("TOWERSTATS_LOG_LEVEL", "error")
        .arg("towers")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 3);
}

#[test]
fn test_not_found_exits_with_two() {
    let dir = temp_dir();
    let output = towerstats(&dir, &["hero", "adora"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("hero not found: adora"));
}

#[test]
fn test_bad_document_exits_with_one() {
    let dir = temp_dir();
    let data = dir.join("broken.json");
    fs::write(&data, "{ not json").unwrap();
    let output = towerstats(&dir, &["--data", data.to_str().unwrap(), "summary"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load catalog"));
}

#[test]
fn test_missing_named_document_exits_with_one() {
    let dir = temp_dir();
    let data = dir.join("typo.json");
    let output = towerstats(&dir, &["--data", data.to_str().unwrap(), "towers"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load catalog"));

    let from_env = Command::new(env!("CARGO_BIN_EXE_towerstats"))
        .current_dir(&dir)
        .env("TOWERSTATS_DATA", &data)
        .env("TOWERSTATS_LOG_LEVEL", "error")
        .arg("towers")
        .output()
        .unwrap();
    assert_eq!(from_env.status.code(), Some(1));
}

#[test]
fn test_serve_answers_each_line_on_stdout() {
    let dir = temp_dir();
    let mut child = Command::new(env!("CARGO_BIN_EXE_towerstats"))
        .current_dir(&dir)
        .env_remove("TOWERSTATS_DATA")
        .env("TOWERSTATS_LOG_LEVEL", "info")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(stdin, r#"{{"jsonrpc":"2.0","id":1,"method":"get_hero_info","params":{{"hero_id":"quincy"}}}}"#).unwrap();
        writeln!(stdin, r#"{{"jsonrpc":"2.0","id":2,"method":"get_tower_info","params":{{"tower_id":"adora"}}}}"#).unwrap();
    }
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["result"]["name"], "Quincy");
    assert_eq!(lines[1]["error"]["code"], -32004);
    assert!(!output.stderr.is_empty(), "logs belong on stderr");
}

#[test]
fn test_gen_default_run_writes_module() {
    let dir = temp_dir();
    let output = towerstats_gen(&dir, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let module = fs::read_to_string(dir.join("generated").join("catalog_data.rs")).unwrap();
    assert!(module.contains("pub static TOWERS: &[Tower]"));
}

#[test]
fn test_gen_config_file_sets_output_and_renderer() {
    let dir = temp_dir();
    fs::write(
        dir.join("towerstats-gen.toml"),
        "output = \"out/tables.rs\"\nrenderer = \"fallback\"\n",
    )
    .unwrap();
    let output = towerstats_gen(&dir, &["generate"]);
    assert!(output.status.success());
    assert!(dir.join("out").join("tables.rs").exists());
    assert!(String::from_utf8_lossy(&output.stdout).contains("fallback renderer"));
}

#[test]
fn test_gen_export_then_serve_from_exported_document() {
    let dir = temp_dir();
    let export = towerstats_gen(&dir, &["export-data"]);
    assert!(export.status.success());
    assert!(dir.join("data").join("btd6_data.json").exists());

    // The service's default document path is the exporter's default output.
    let output = towerstats(&dir, &["compare", "ninja_monkey", "super_monkey"]);
    assert!(output.status.success());
    let costs = stdout_json(&output);
    assert_eq!(costs["ninja_monkey"], "not_found");
    assert_eq!(costs["super_monkey"], 2500);
}

#[test]
fn test_gen_lint_fail_on_error() {
    let dir = temp_dir();
    let template = dir.join("bad.j2");
    fs::write(&template, "{% if towers %}x{% endif %}\n").unwrap();
    let path = template.to_str().unwrap();

    let lenient = towerstats_gen(&dir, &["lint", "--template", path]);
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("conditional"));

    let strict = towerstats_gen(&dir, &["lint", "--template", path, "--fail-on-error"]);
    assert!(!strict.status.success());

    let bundled = towerstats_gen(&dir, &["lint", "--fail-on-error"]);
    assert!(bundled.status.success());
}

//! Integration tests for the mkubectl binary.
//!
//! Runs the built CLI with `--binary` pointing at the fake kubectl and an
//! isolated config home so user configuration never leaks in.

use super::test_utils::FakeKubectl;
use std::process::{Command, Output};

fn mkubectl(fake: &FakeKubectl, extra: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_mkubectl");
    let home = fake.dir().join("home");
    std::fs::create_dir_all(&home).unwrap();
    Command::new(bin)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("MKUBECTL_LOG")
        .arg("--binary")
        .arg(fake.binary())
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn test_concurrent_run_prints_labelled_output() {
    let fake = FakeKubectl::new(&["prod-us", "prod-eu", "staging"], &[]);
    let output = mkubectl(&fake, &["-c", "prod-.*", "get", "pods"]);

    assert!(
        output.status.success(),
        "mkubectl should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "NAME\n\tprod-usprod-us-pod\n\tprod-usNAME\n\tprod-euprod-eu-pod\n\tprod-eu"
    );
}

#[test]
fn test_failure_exits_non_zero_with_context_in_message() {
    let fake = FakeKubectl::new(&["a", "b"], &["b"]);
    let output = mkubectl(&fake, &["--log-level", "off", "get", "pods"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("b: failed to run: 'get pods'"), "stderr={stderr}");
    assert!(stderr.contains("b is unreachable"), "stderr={stderr}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("a-pod"));
}

#[test]
fn test_sequential_stream_writes_directly() {
    let fake = FakeKubectl::new(&["x", "y"], &[]);
    let output = mkubectl(&fake, &["--sequential", "--stream", "-n", "ops", "get", "pods"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "NAME\n\txx-pod\nNAME\n\tyy-pod\n"
    );
    assert_eq!(
        fake.executions(),
        vec![
            "--context x --namespace ops get pods",
            "--context y --namespace ops get pods"
        ]
    );
}

#[test]
fn test_concurrent_stream_keeps_lines_whole() {
    let fake = FakeKubectl::scripted(
        &["A", "B"],
        "case \"$2\" in\n\
         \x20 A) printf 'partial-from-A'; sleep 0.5; printf ' rest-of-A\\nsecond-A\\n' ;;\n\
         \x20 B) sleep 0.2; printf 'line-from-B\\n' ;;\n\
         esac\n",
    );
    let output = mkubectl(&fake, &["--stream", "--log-level", "off", "get", "pods"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.ends_with('\n'), "stdout={stdout:?}");
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort();
    assert_eq!(
        lines,
        vec!["\tAsecond-A", "line-from-B", "partial-from-A rest-of-A"],
        "stdout={stdout:?}"
    );
}

#[test]
fn test_invalid_log_level_is_startup_error() {
    let fake = FakeKubectl::new(&["a"], &[]);
    let output = mkubectl(&fake, &["--log-level", "chatty", "get", "pods"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level: chatty"));
    assert!(fake.invocations().is_empty(), "nothing may run");
}

#[test]
fn test_invalid_pattern_runs_nothing() {
    let fake = FakeKubectl::new(&["a"], &[]);
    let output = mkubectl(&fake, &["-c", "(", "get", "pods"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to compile context pattern"));
    assert!(fake.invocations().is_empty());
}

#[test]
fn test_logs_stay_off_stdout() {
    let fake = FakeKubectl::new(&["a"], &[]);
    let output = mkubectl(&fake, &["--log-level", "debug", "--no-prefix", "version"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "NAME\na-pod\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("mkubectl starting"));
}

#[test]
fn test_config_file_selects_sequential_mode() {
    let fake = FakeKubectl::new(&["a", "b", "c"], &["a"]);
    let config = fake.dir().join("mkubectl.toml");
    std::fs::write(&config, "[dispatch]\nmode = \"sequential\"\n").unwrap();

    let output = mkubectl(&fake, &["--config", config.to_str().unwrap(), "get", "pods"]);

    assert!(!output.status.success());
    assert_eq!(fake.executions(), vec!["--context a get pods"]);
}

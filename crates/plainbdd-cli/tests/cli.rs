//! Smoke tests for the `plainbdd` binary.

use std::fs;
use std::str;

use assert_cmd::Command;
use rstest::rstest;

const FIXTURE_FEATURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/features");

const ENV_VARS: [&str; 5] = [
    "PLAINBDD_FEATURES_DIR",
    "PLAINBDD_SHOW_ADVISE",
    "PLAINBDD_COLOR",
    "PLAINBDD_FORMAT",
    "PLAINBDD_LOG_LEVEL",
];

struct Outcome {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn plainbdd() -> Command {
    let Ok(mut cmd) = Command::cargo_bin("plainbdd") else {
        panic!("plainbdd binary must be built");
    };
    for key in ENV_VARS {
        cmd.env_remove(key);
    }
    cmd
}

fn run(cmd: &mut Command) -> Outcome {
    let output = match cmd.output() {
        Ok(output) => output,
        Err(err) => panic!("plainbdd must start: {err}"),
    };
    let (Ok(stdout), Ok(stderr)) = (str::from_utf8(&output.stdout), str::from_utf8(&output.stderr))
    else {
        panic!("plainbdd output must be UTF-8");
    };
    Outcome {
        code: output.status.code(),
        stdout: stdout.to_owned(),
        stderr: stderr.to_owned(),
    }
}

#[test]
fn steps_without_providers_are_missing() {
    let outcome = run(plainbdd().args(["--features-dir", FIXTURE_FEATURES, "--color", "never"]));
    assert_eq!(outcome.code, Some(0), "{}", outcome.stderr);
    assert!(outcome.stdout.contains("    Given a visitor"));
    assert!(outcome.stdout.contains("# "));
    assert!(outcome.stdout.contains("greeting.feature : 5"));
    assert!(outcome.stdout.contains(
        "1 scenario(s), 3 step(s): 0 passed, 0 failed, 3 missing, 0 without assertions"
    ));
    assert!(!outcome.stdout.contains("[Advise]"));
    assert!(!outcome.stdout.contains('\u{1b}'));
}

#[rstest]
#[case::flag(&["--advise"], None)]
#[case::environment(&[], Some("yes"))]
fn advice_prints_registration_templates(#[case] flags: &[&str], #[case] env: Option<&str>) {
    let mut cmd = plainbdd();
    cmd.args(["--features-dir", FIXTURE_FEATURES, "--color", "never"])
        .args(flags);
    if let Some(value) = env {
        cmd.env("PLAINBDD_SHOW_ADVISE", value);
    }
    let outcome = run(&mut cmd);
    assert_eq!(outcome.code, Some(0), "{}", outcome.stderr);
    assert!(outcome.stdout.contains("[Advise]"));
    assert!(outcome.stdout.contains("struct GreetingHelper;"));
    assert!(outcome.stdout.contains(r#"steps.given(r"^a visitor$", given_a_visitor)?;"#));
    assert!(outcome.stdout.contains(r#"steps.when(r"^they say hello$", when_they_say_hello)?;"#));
}

#[test]
fn json_format_reports_a_summary() {
    let outcome = run(plainbdd()
        .env("PLAINBDD_FEATURES_DIR", FIXTURE_FEATURES)
        .args(["--format", "json"]));
    assert_eq!(outcome.code, Some(0), "{}", outcome.stderr);
    let report: serde_json::Value = match serde_json::from_str(&outcome.stdout) {
        Ok(report) => report,
        Err(err) => panic!("stdout must be JSON: {err}\n{}", outcome.stdout),
    };
    assert_eq!(report["summary"]["scenarios"], 1);
    assert_eq!(report["summary"]["missing"], 3);
    let Some(lines) = report["lines"].as_array() else {
        panic!("report must list lines");
    };
    let missing = lines.iter().filter(|line| line["status"] == "missing").count();
    assert_eq!(missing, 3);
}

#[test]
fn missing_features_directory_is_advised() {
    let Ok(tmp) = tempfile::tempdir() else {
        panic!("cannot create a temp dir");
    };
    let outcome = run(plainbdd()
        .current_dir(tmp.path())
        .args(["--advise", "--color", "never"]));
    assert_eq!(outcome.code, Some(0), "{}", outcome.stderr);
    assert!(outcome.stdout.contains("Directory features/ not found."));
    assert!(outcome.stdout.contains("mkdir features"));
}

#[test]
fn fatal_script_errors_set_the_exit_status() {
    let Ok(tmp) = tempfile::tempdir() else {
        panic!("cannot create a temp dir");
    };
    if let Err(err) = fs::write(tmp.path().join("broken.feature"), "Scenario: s\n  And x\n") {
        panic!("cannot write the feature: {err}");
    }
    let outcome = run(plainbdd().arg("--features-dir").arg(tmp.path()));
    assert_eq!(outcome.code, Some(1));
    assert!(outcome.stderr.contains("run aborted"), "{}", outcome.stderr);
    assert!(outcome.stderr.contains("has no preceding Given, When or Then"));
}

#[rstest]
#[case("PLAINBDD_COLOR", "pink")]
#[case("PLAINBDD_FORMAT", "xml")]
#[case("PLAINBDD_LOG_LEVEL", "loud")]
#[case("PLAINBDD_SHOW_ADVISE", "maybe")]
fn invalid_environment_exits_with_status_two(#[case] key: &str, #[case] value: &str) {
    let outcome = run(plainbdd()
        .env(key, value)
        .args(["--features-dir", FIXTURE_FEATURES]));
    assert_eq!(outcome.code, Some(2));
    assert!(outcome.stderr.contains("invalid configuration"), "{}", outcome.stderr);
    assert!(outcome.stdout.is_empty());
}

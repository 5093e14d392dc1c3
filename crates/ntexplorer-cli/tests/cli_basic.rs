//! Basic CLI E2E tests.
//!
//! Tests run the built binary with HOME pointed at a temporary directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run_cli_in(home: &Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ntexplorer"))
        .args(args)
        .env("HOME", home)
        .env_remove("NTEXPLORER_ENV")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let home = tempfile::tempdir().unwrap();
    run_cli_in(home.path(), args, "")
}

#[test]
fn test_questions_lists_catalog() {
    let (code, stdout, _) = run_cli(&["questions"]);
    assert_eq!(code, 0);
    let catalog: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(catalog["linear"].as_array().unwrap().len(), 4);
    assert_eq!(catalog["linear"][3]["id"], "social");
    assert_eq!(catalog["solo_branch"]["id"], "solo_exp");
    assert_eq!(catalog["group_branch"]["id"], "group_type");
}

#[test]
fn test_questions_localized() {
    let (code, stdout, _) = run_cli(&["questions", "--lang", "en"]);
    assert_eq!(code, 0);
    let catalog: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(catalog["linear"][0]["prompt"].is_string());
    assert!(catalog["linear"][0]["options"][0]["label"].is_string());
}

#[test]
fn test_prompt_includes_answers_and_filters() {
    let (code, stdout, stderr) = run_cli(&[
        "prompt",
        "--answer",
        "social=solo",
        "--answer",
        "solo_exp=first",
        "--price",
        "$$$",
        "--time-of-day",
        "Nightlife",
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let request: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let prompt = request["prompt"].as_str().unwrap();
    assert!(prompt.contains("exactly 6"));
    assert!(prompt.contains("social: solo, solo_exp: first"));
    assert!(prompt.contains("$$$"));
    assert!(prompt.contains("Nightlife"));
    assert!(request.get("location").is_none());
}

#[test]
fn test_prompt_with_location_flags() {
    let (code, stdout, _) = run_cli(&["prompt", "--lat", "25.03", "--lon", "121.56"]);
    assert_eq!(code, 0);
    let request: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(request["location"]["latitude"], 25.03);
    assert_eq!(request["location"]["longitude"], 121.56);
}

#[test]
fn test_prompt_rejects_unknown_filter_value() {
    let (code, _, stderr) = run_cli(&["prompt", "--transport", "Boat"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("reply.txt");
    std::fs::write(
        &file,
        "Here you go:\n```json\n[{\"nameZh\":\"九份老街\",\"nameEn\":\"Jiufen Old Street\",\"rating\":\"4.6\"}]\n```",
    )
    .unwrap();

    let (code, stdout, _) = run_cli_in(dir.path(), &["parse", file.to_str().unwrap()], "");
    assert_eq!(code, 0);
    let cards: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(cards[0]["nameEn"], "Jiufen Old Street");
    assert_eq!(cards[0]["rating"], "4.6");
}

#[test]
fn test_parse_stdin_without_array_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli_in(home.path(), &["parse"], "no recommendations today");
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_set_get_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli_in(home.path(), &["config", "set", "locale", "en"], "");
    assert_eq!(code, 0);
    let (code, stdout, _) = run_cli_in(home.path(), &["config", "get", "locale"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "en");

    let (code, stdout, _) = run_cli_in(home.path(), &["config", "path"], "");
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn test_config_get_unknown_key() {
    let (code, _, stderr) = run_cli(&["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no.such.key"));
}

#[test]
fn test_quiz_exits_on_closed_stdin() {
    let (code, stdout, _) = run_cli(&["quiz", "--lang", "en"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Explore Northern Taiwan"));
}

#[test]
fn test_quiz_without_key_returns_to_filters_with_message() {
    let home = tempfile::tempdir().unwrap();
    // start, four linear answers, the group branch answer, then fetch
    let input = "\n1\n1\n1\n2\n1\n\nq\n";
    let (code, stdout, stderr) = run_cli_in(home.path(), &["quiz", "--lang", "en", "--events"], input);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Failed to load matches. Please try again."));
    assert!(stderr.contains("\"type\":\"BranchEntered\""));
    assert!(stderr.contains("\"type\":\"FetchStarted\""));
    assert!(stderr.contains("\"type\":\"FetchFailed\""));
}

#[test]
fn test_quiz_switches_language_mid_quiz() {
    let home = tempfile::tempdir().unwrap();
    // start, answer the first question, switch to zh
    let input = "\n1\nzh\n";
    let (code, stdout, _) = run_cli_in(home.path(), &["quiz", "--lang", "en"], input);
    assert_eq!(code, 0);
    assert!(stdout.contains("What's your preferred activity level?"));
    assert!(stdout.contains("What's your main interest?"));
    assert!(stdout.contains("您主要的興趣是？"));
}

#[test]
fn test_quiz_returns_to_welcome_from_filters() {
    let home = tempfile::tempdir().unwrap();
    let input = "\n1\n1\n1\n1\n1\nw\n";
    let (code, stdout, stderr) =
        run_cli_in(home.path(), &["quiz", "--lang", "en", "--events"], input);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Refine Your Trip"));
    assert!(stderr.contains("\"type\":\"ReturnedToWelcome\""));
    assert!(!stderr.contains("\"type\":\"FetchStarted\""));
    assert_eq!(stdout.matches("Explore Northern Taiwan").count(), 2);
}

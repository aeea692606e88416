//! Integration tests for the `jules` binary

use std::fs;

use assert_cmd::Command;
use axum::http::StatusCode;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fixtures::{API_KEY, GADGETS, WIDGETS};
use super::common::mock_server::MockServer;

/// Data directory whose config points the binary at `base_url`.
fn data_dir(api_key: Option<&str>, base_url: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = format!("base_url = \"{}\"\n", base_url);
    if let Some(key) = api_key {
        config.push_str(&format!("api_key = \"{}\"\n", key));
    }
    fs::write(dir.path().join("config.toml"), config).expect("Failed to write config");
    dir
}

fn jules(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jules").expect("binary is built");
    cmd.env_remove("JULES_API_KEY")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .expect("command thread panicked")
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("jules")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sessions"))
        .stdout(predicate::str::contains("activities"))
        .stdout(predicate::str::contains("send"));
}

#[test]
fn test_missing_api_key_fails() {
    let dir = data_dir(None, "http://127.0.0.1:9/v1alpha");
    jules(&dir)
        .arg("sources")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Jules API key configured"));
}

#[test]
fn test_logs_go_to_data_dir() {
    let dir = data_dir(None, "http://127.0.0.1:9/v1alpha");
    jules(&dir).arg("sources").assert().failure();
    assert!(dir.path().join("logs").join("jules.log").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sources_command() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.arg("sources");
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("* acme/widgets  sources/github/acme/widgets"))
        .stdout(predicate::str::contains("  acme/gadgets  sources/github/acme/gadgets"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_api_key_flag_wins_over_config() {
    let server = MockServer::start().await;
    let dir = data_dir(Some("stale-key"), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["--api-key", API_KEY, "sessions"]);
    run(cmd).await.success();

    assert!(server
        .requests()
        .iter()
        .all(|request| request.api_key.as_deref() == Some(API_KEY)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sessions_filtered_by_source() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["sessions", "--source", GADGETS]);
    run(cmd)
        .await
        .success()
        .stdout("[COMPLETED] Gadget cleanup  s2\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sessions_json_output() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["--json", "sessions"]);
    let output = run(cmd).await.success().get_output().stdout.clone();

    let sessions: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<_> = sessions
        .as_array()
        .unwrap()
        .iter()
        .map(|session| session["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["s1", "s3"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_activities_newest_first() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["activities", "s1"]);
    let output = run(cmd).await.success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();

    assert!(text.starts_with("Chat: s1\n"));
    let plan = text.find("── Plan Generated").unwrap();
    let agent = text.find("── Jules").unwrap();
    let user = text.find("── You").unwrap();
    let progress = text.find("── Progress Update").unwrap();
    assert!(plan < agent && agent < user && user < progress);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_activities_copy() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["activities", "s1", "--copy"]);
    run(cmd)
        .await
        .success()
        .stdout("1. Reproduce\n2. Fix\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_new_session_with_branch() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["new", "--prompt", "Add CI", "--branch", "dev"]);
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("[QUEUED] Add CI"))
        .stderr(predicate::str::contains("Session created successfully"));

    let body = server.last_request().unwrap().json();
    assert_eq!(body["prompt"], "Add CI");
    assert_eq!(body["sourceContext"]["githubRepoContext"]["startingBranch"], "dev");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_new_session_with_empty_prompt_fails() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["new", "--prompt", ""]);
    run(cmd)
        .await
        .failure()
        .stderr(predicate::str::contains("Failed to create session"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_send_prints_summary_then_reply() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["send", "s1", "Looks good"]);
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::starts_with("Last Activity: Plan Generated\n"))
        .stdout(predicate::str::contains("**You:**\n\nLooks good"))
        .stderr(predicate::str::contains("Message sent"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_send_when_feed_fetch_fails() {
    let server = MockServer::start().await;
    server.fail(
        "sessions/s1/activities",
        StatusCode::INTERNAL_SERVER_ERROR,
        "feed down",
    );
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["send", "s1", "hello"]);
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Last Activity").not())
        .stderr(predicate::str::contains(
            "Failed to fetch activities: Internal Server Error - feed down",
        ))
        .stderr(predicate::str::contains("Message sent"));

    let sent = server.requests_to("sessions/s1:sendMessage");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].json()["prompt"], "hello");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_new_session_when_source_details_fail() {
    let server = MockServer::start().await;
    server.fail(WIDGETS, StatusCode::SERVICE_UNAVAILABLE, "busy");
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["new", "--prompt", "Add CI", "--branch", "dev"]);
    run(cmd)
        .await
        .success()
        .stderr(predicate::str::contains("Failed to fetch source details"))
        .stderr(predicate::str::contains("Session created successfully"));

    let body = server.requests_to("sessions").pop().unwrap().json();
    assert_eq!(body["sourceContext"]["source"], WIDGETS);
    assert_eq!(body["sourceContext"]["githubRepoContext"]["startingBranch"], "dev");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_new_session_with_source_skips_first_source_details() {
    let server = MockServer::start().await;
    server.fail(WIDGETS, StatusCode::SERVICE_UNAVAILABLE, "busy");
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.args(["new", "--prompt", "Tidy up", "--source", GADGETS]);
    run(cmd).await.success();

    assert!(server.requests_to(WIDGETS).is_empty());
    let body = server.requests_to("sessions").pop().unwrap().json();
    assert_eq!(body["sourceContext"]["source"], GADGETS);
    assert_eq!(body["sourceContext"]["githubRepoContext"]["startingBranch"], "trunk");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_piped_notifications_are_plain() {
    let server = MockServer::start().await;
    let dir = data_dir(Some(API_KEY), &server.base_url());

    let mut cmd = jules(&dir);
    cmd.env_remove("NO_COLOR").args(["new", "--prompt", ""]);
    run(cmd)
        .await
        .failure()
        .stderr(predicate::str::contains("Failed to create session: Bad Request"))
        .stderr(predicate::str::contains("\x1b[").not());
}

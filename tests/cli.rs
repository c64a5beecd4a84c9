use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use tempfile::TempDir;

/// Command pointed at a config path that does not exist yet
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("capstone-search").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .env_remove("CAPSTONE_SEARCH_ENDPOINT")
        .env_remove("CAPSTONE_SEARCH_SITE_URL")
        .env("NO_COLOR", "1");
    cmd
}

/// Answer a single request with `body` and return the endpoint URL
fn serve_once(body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{}/api/search", addr)
}

fn chunk(video_id: &str) -> String {
    format!(
        r#"{{"id":"{0}:0","score":0.9,"metadata":{{"videoId":"{0}","title":"t","text":"x","start":1,"end":2}}}}"#,
        video_id
    )
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("examples"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn no_command_shows_prompt_without_searching() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        // Nothing listens here; reaching for it would show an error
        .env("CAPSTONE_SEARCH_ENDPOINT", "http://127.0.0.1:9/api/search")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Search any topic in the Launch School Presentations from 2020-2023.",
        ))
        .stdout(predicate::str::contains("api load testing"))
        .stdout(predicate::str::contains("automated canary deployments"))
        .stdout(predicate::str::contains("Error loading results").not());
}

#[test]
fn examples_list() {
    let dir = TempDir::new().unwrap();
    let output = cmd(&dir).args(["examples", "--list"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "api load testing");
    assert_eq!(lines[6], "implementation challenges future work design decisions");
}

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));
    assert!(dir.path().join("config.toml").exists());

    cmd(&dir)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[search]"))
        .stdout(predicate::str::contains("debounce_ms = 400"));
}

#[test]
fn unreachable_endpoint_renders_error() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("CAPSTONE_SEARCH_ENDPOINT", "http://127.0.0.1:9/api/search")
        .args(["search", "websockets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error loading results"))
        .stdout(predicate::str::contains("Share:").not());
}

#[test]
fn unreachable_endpoint_fails_json_mode() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("CAPSTONE_SEARCH_ENDPOINT", "http://127.0.0.1:9/api/search")
        .args(["search", "websockets", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading results"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[search]\nendpoint = 3\n").unwrap();
    cmd(&dir)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn json_output_respects_limit() {
    let dir = TempDir::new().unwrap();
    let body = format!("[{},{},{}]", chunk("a"), chunk("b"), chunk("c"));
    let endpoint = serve_once(body);

    let output = cmd(&dir)
        .env("CAPSTONE_SEARCH_ENDPOINT", endpoint)
        .args(["search", "websockets", "--json", "--limit", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["metadata"]["videoId"], "a");
    assert_eq!(results[1]["metadata"]["videoId"], "b");
}

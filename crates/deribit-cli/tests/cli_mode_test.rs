/*
[INPUT]:  deribit-cli binary, temporary config files, mock exchange
[OUTPUT]: Exit status and output checks for one-shot commands
[POS]:    Integration test layer - binary startup and subcommands
[UPDATE]: When changing CLI flags or startup flow
*/

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(name: &str, yaml: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("deribit-cli-{}-{name}.yaml", std::process::id()));
    std::fs::write(&path, yaml).expect("write temp config");
    path
}

fn cli(config: &Path, base_url: &str, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_deribit-cli"));
    command
        .arg("--config")
        .arg(config)
        .arg("--log-level")
        .arg("error")
        .arg("--base-url")
        .arg(base_url)
        .args(args);
    command
}

async fn output_of(mut command: Command) -> Output {
    tokio::task::spawn_blocking(move || command.output().expect("failed to start deribit-cli"))
        .await
        .expect("blocking task")
}

async fn mount_auth(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/public/auth"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn missing_credentials_exit_with_variable_name() {
    let config = write_config("nocreds", "");
    let mut command = cli(&config, "http://127.0.0.1:9/", &["parallel"]);
    command
        .env_remove("DERIBIT_CLIENT_ID")
        .env_remove("DERIBIT_CLIENT_SECRET");

    let output = output_of(command).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DERIBIT_CLIENT_ID"), "stderr: {stderr}");
}

#[tokio::test]
async fn rejected_auth_terminates_process() {
    let server = MockServer::start().await;
    mount_auth(
        &server,
        400,
        json!({"jsonrpc": "2.0", "error": {"code": 13004, "message": "invalid_credentials"}}),
    )
    .await;

    let config = write_config("rejected", "");
    let mut command = cli(&config, &server.uri(), &["parallel"]);
    command
        .env("DERIBIT_CLIENT_ID", "id")
        .env("DERIBIT_CLIENT_SECRET", "secret");

    let output = output_of(command).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("authentication failed"), "stderr: {stderr}");
    assert!(stderr.contains("invalid_credentials"), "stderr: {stderr}");
}

#[tokio::test]
async fn parallel_command_renders_joined_tasks() {
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({"jsonrpc": "2.0", "result": {"access_token": "tok"}})).await;
    Mock::given(method("POST"))
        .and(path("/private/buy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"order": {"order_id": "ETH-1"}}
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/public/get_order_book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"instrument_name": "BTC-PERPETUAL", "bids": [[92500.0, 10.0]], "asks": []}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = write_config("parallel", "");
    let mut command = cli(&config, &server.uri(), &["parallel"]);
    command
        .env("DERIBIT_CLIENT_ID", "id")
        .env("DERIBIT_CLIENT_SECRET", "secret");

    let output = output_of(command).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "status: {}\nstdout: {stdout}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("[buy-eth-1] private/buy"));
    assert!(stdout.contains("[book-btc-1] public/get_order_book"));
    assert!(stdout.contains("[buy-eth-2] private/buy detached"));
    assert!(stdout.contains("Order Book for BTC-PERPETUAL:"));
}

#[tokio::test]
async fn trading_loop_reports_end_to_end_latency() {
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({"jsonrpc": "2.0", "result": {"access_token": "tok"}})).await;
    Mock::given(method("POST"))
        .and(path("/private/buy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"order": {"order_id": "BTC-9"}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/public/get_order_book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"instrument_name": "BTC-PERPETUAL"}
        })))
        .mount(&server)
        .await;

    let config = write_config("loop", "");
    let mut command = cli(&config, &server.uri(), &["trading-loop", "--price", "92500.5"]);
    command
        .env("DERIBIT_CLIENT_ID", "id")
        .env("DERIBIT_CLIENT_SECRET", "secret");

    let output = output_of(command).await;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("End-to-End Trading Loop Latency"));
}

#[tokio::test]
async fn explicit_missing_config_is_an_error() {
    let missing = std::env::temp_dir().join("deribit-cli-does-not-exist.yaml");
    let output = output_of(cli(&missing, "http://127.0.0.1:9/", &["parallel"])).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("load config"));
}

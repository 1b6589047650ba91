//! End-to-end runs of the mazda-tool binary.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_mazda-tool");

fn tool(config: &Path) -> Command {
    let mut cmd = Command::new(BIN);
    for key in [
        "mazda_api_email",
        "mazda_api_password",
        "mazda_api_car_id",
        "mazda_api_region",
        "mazda_api_url",
    ] {
        cmd.env_remove(key);
    }
    cmd.arg("--config").arg(config);
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn fleet() -> Value {
    json!([
        {"id": 101, "vin": "JM3KFBCM1N0000001", "nickname": "Red", "carlineName": "CX-5"},
        {"id": 102, "vin": "JM3KFBCM1N0000002", "nickname": "Blue", "carlineName": "MX-5"}
    ])
}

async fn spawn_gateway() -> String {
    let app = Router::new()
        .route("/vehicles", get(|| async { Json(fleet()) }))
        .route(
            "/vehicles/:id/status",
            get(|| async { Json(json!({"doorsLocked": false})) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn no_arguments_prints_usage_and_exits_1() {
    let output = Command::new(BIN).output().await.unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage"));
}

#[tokio::test]
async fn credentials_without_vehicle_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = tool(&dir.path().join("absent.json"))
        .args(["--email", "owner@example.com", "--password", "pw"])
        .output()
        .await
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no vehicle selected"));
}

#[tokio::test]
async fn missing_password_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = tool(&dir.path().join("absent.json"))
        .args(["--email", "owner@example.com", "--list"])
        .output()
        .await
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn list_prints_gateway_json() {
    let base = spawn_gateway().await;
    let dir = tempfile::tempdir().unwrap();
    let output = tool(&dir.path().join("absent.json"))
        .args(["--list", "--api_url", base.as_str()])
        .env("mazda_api_email", "owner@example.com")
        .env("mazda_api_password", "pw")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let printed: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(printed, fleet());
    assert!(stdout(&output).starts_with("[\n  {\n"));
}

#[tokio::test]
async fn config_file_selects_vehicle() {
    let base = spawn_gateway().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mazda_api_tool.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "{}",
        json!({"email": "file@example.com", "password": "pw", "car_id": 102, "api_url": base})
    )
    .unwrap();

    let output = tool(&path).arg("--status").output().await.unwrap();
    assert_eq!(output.status.code(), Some(0));
    let printed: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(printed, json!({"doorsLocked": false}));
}

#[tokio::test]
async fn unknown_nickname_exits_3() {
    let base = spawn_gateway().await;
    let dir = tempfile::tempdir().unwrap();
    let output = tool(&dir.path().join("absent.json"))
        .args([
            "--email",
            "owner@example.com",
            "--password",
            "pw",
            "--name",
            "green",
            "--api_url",
            base.as_str(),
        ])
        .output()
        .await
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(stdout(&output).is_empty());
}

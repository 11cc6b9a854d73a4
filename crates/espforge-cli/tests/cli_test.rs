//! Integration tests for the `espforge` binary's offline commands.
//!
//! Every test points `XDG_CONFIG_HOME` at a fresh temp dir and clears the
//! API-key env vars, so nothing here reads a real config or touches the
//! network.

use std::process::{Command, Output};

use tempfile::TempDir;

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

fn espforge(config_home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_espforge"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("ESPFORGE_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("ESPFORGE_MODEL")
        .env_remove("ESPFORGE_API_BASE")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run espforge binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[test]
fn prompt_works_without_api_key() {
    let home = TempDir::new().unwrap();
    let out = espforge(
        &home,
        &[
            "prompt",
            "--goal",
            "Smart Plant Watering System",
            "--module",
            "Soil Moisture Sensor",
            "--language",
            "micropython",
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("Smart Plant Watering System"));
    assert!(text.contains("Soil Moisture Sensor"));
    assert!(text.contains("MicroPython"));
    assert!(text.contains("### 1. Detailed Functional Description"));
    assert!(text.contains("English"));
}

#[test]
fn prompt_uses_custom_board_directive() {
    let home = TempDir::new().unwrap();
    let out = espforge(
        &home,
        &[
            "prompt",
            "--custom-board",
            "ESP32-C3 SuperMini, LED on GPIO8",
            "--response-language",
            "Persian",
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("ESP32-C3 SuperMini, LED on GPIO8"));
    assert!(text.contains("Persian"));
}

#[test]
fn catalog_lists_options() {
    let home = TempDir::new().unwrap();
    let out = espforge(&home, &["catalog"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("Boards:"));
    assert!(text.contains("Custom"));
    assert!(text.contains("WiFi"));
}

#[test]
fn generate_without_api_key_fails_with_hint() {
    let home = TempDir::new().unwrap();
    let out = espforge(&home, &["generate"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("API key not found"),
        "stderr: {}",
        stderr(&out)
    );
}

#[test]
fn init_writes_config_and_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    let out = espforge(
        &home,
        &[
            "init",
            "--api-key",
            "AIzaSyExampleKey1234",
            "--locale",
            "fa",
            "--response-language",
            "Persian",
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(!stdout(&out).contains("AIzaSyExampleKey1234"));

    let path = home.path().join("espforge").join("config.toml");
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("AIzaSyExampleKey1234"));
    assert!(written.contains("locale = \"fa\""));
    assert!(written.contains("response_language = \"Persian\""));

    let again = espforge(&home, &["init"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));

    let forced = espforge(&home, &["init", "--force"]);
    assert!(forced.status.success(), "stderr: {}", stderr(&forced));
}

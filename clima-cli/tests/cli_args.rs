//! Integration tests running the `clima` binary.

use std::process::Command;

/// Run the CLI with an isolated config directory.
fn run_cli(args: &[&str]) -> std::process::Output {
    let home = std::env::temp_dir().join("clima-cli-tests-home");
    Command::new(env!("CARGO_BIN_EXE_clima"))
        .args(args)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("CLIMA_BASE_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute clima")
}

#[test]
fn help_lists_subcommands() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("show"));
    assert!(stdout.contains("configure"));
    assert!(stdout.contains("provinces"));
}

#[test]
fn provinces_prints_the_table() {
    let output = run_cli(&["provinces"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("41  Sevilla"));
    assert!(stdout.contains("23  Jaén"));
    assert_eq!(stdout.lines().count(), 8);
}

#[test]
fn unknown_province_fails_before_any_request() {
    // The base URL is unroutable; a request would surface a different message.
    let output = run_cli(&["show", "sevilla", "--base-url", "http://127.0.0.1:9"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Por favor, ingresa una provincia andaluza válida"),
        "stderr: {stderr}"
    );
    assert!(!stderr.contains("Cargando"), "stderr: {stderr}");
}

#[test]
fn unreachable_service_reports_retry_message() {
    let output = run_cli(&["show", "Sevilla", "--base-url", "http://127.0.0.1:9"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Hubo un problema al obtener el clima"),
        "stderr: {stderr}"
    );
}

//! Integration tests for CLI argument handling and the REPL loop
//!
//! Runs the built binary with piped stdin. Only commands that never touch the
//! network are sent.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .args(args)
        .output()
        .expect("Failed to execute pokedex")
}

/// Helper to run the REPL with `input` piped to stdin
fn run_repl(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn pokedex");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");

    child.wait_with_output().expect("Failed to wait for pokedex")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pokedex"), "Help should mention pokedex");
    assert!(
        stdout.contains("cache-interval"),
        "Help should mention --cache-interval flag"
    );
}

#[test]
fn test_zero_cache_interval_prints_error_and_exits() {
    let output = run_cli(&["--cache-interval", "0"]);
    assert!(!output.status.success(), "Expected zero interval to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid cache interval"),
        "Should print error message about the interval: {}",
        stderr
    );
}

#[test]
fn test_invalid_base_url_prints_error_and_exits() {
    let output = run_cli(&["--base-url", "ftp://example.com"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid base URL"), "stderr: {}", stderr);
}

#[test]
fn test_repl_prints_help_and_exits_on_command() {
    let output = run_repl(&[], "help\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome to the Pokedex!"));
    assert!(stdout.contains("Pokedex > "));
    assert!(stdout.contains("Closing the Pokedex... Goodbye!"));
}

#[test]
fn test_repl_exits_on_end_of_input() {
    let output = run_repl(&[], "");
    assert!(output.status.success(), "EOF should end the session cleanly");
}

#[test]
fn test_repl_reports_errors_and_continues() {
    let output = run_repl(&[], "fly\ninspect pikachu\npokedex\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unknown command: fly"));
    assert!(stdout.contains("you have not caught pikachu yet"));
    assert!(stdout.contains("Your Pokedex is empty"));
    assert!(stdout.contains("Goodbye!"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use pokedex::cli::{Cli, CliError, StartupConfig};
    use std::time::Duration;

    #[test]
    fn test_cli_no_args_uses_default_interval() {
        let cli = Cli::parse_from(["pokedex"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_cli_custom_interval_and_base_url() {
        let cli = Cli::parse_from([
            "pokedex",
            "--cache-interval",
            "10",
            "--base-url",
            "http://127.0.0.1:8080/api/v2",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_interval, Duration::from_secs(10));
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/v2");
    }

    #[test]
    fn test_cli_zero_interval_is_error() {
        let cli = Cli::parse_from(["pokedex", "--cache-interval", "0"]);
        assert_eq!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidCacheInterval(0))
        );
    }
}

//! Argument and format errors are reported before any login attempt.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wealthgrabber_testing::TestWorld;

#[test]
fn test_conflicting_liquidity_flags_are_usage_errors() {
    let world = TestWorld::new();
    let result = world
        .run(&["list", "--liquid-only", "--not-liquid"])
        .unwrap();

    assert_eq!(result.code(), Some(2));
    assert!(result.stdout().is_empty());
    assert!(
        result.stderr().contains("cannot be used with"),
        "stderr: {}",
        result.stderr()
    );
}

#[test]
fn test_conflicting_pnl_flags_are_usage_errors() {
    let world = TestWorld::new();
    let result = world.run(&["assets", "-p", "-l"]).unwrap();

    assert_eq!(result.code(), Some(2));
}

#[test]
fn test_unsupported_format_fails_before_login() {
    let world = TestWorld::new();
    for command in ["list", "activities", "assets"] {
        let result = world.run(&[command, "--format", "xml"]).unwrap();

        assert_eq!(result.code(), Some(1), "{}", command);
        assert!(result.stdout().is_empty());
        assert!(
            result
                .stderr()
                .contains("Error: Unsupported format 'xml'. Valid formats: table, json, csv"),
            "stderr: {}",
            result.stderr()
        );
        assert!(!result.stderr().contains("Password"));
    }
}

#[test]
fn test_invalid_config_is_reported() {
    let world = TestWorld::new().with_config("activity_limit = \"lots\"\n");
    let result = world.run(&["list", "--format", "xml"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().starts_with("Error:"), "stderr: {}", result.stderr());
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("wealthgrabber");
    cmd.arg("--help").assert().success().stdout(
        predicate::str::contains("login")
            .and(predicate::str::contains("logout"))
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("activities"))
            .and(predicate::str::contains("assets")),
    );
}

#[test]
fn test_assets_help_documents_filters() {
    let mut cmd = cargo_bin_cmd!("wealthgrabber");
    cmd.args(["assets", "--help"]).assert().success().stdout(
        predicate::str::contains("--by-account")
            .and(predicate::str::contains("--profits"))
            .and(predicate::str::contains("--losses")),
    );
}

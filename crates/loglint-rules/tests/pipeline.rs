//! End-to-end checks: Rust source in, diagnostics out.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use loglint_core::{Analyzer, Config, Diagnostic, DiagnosticSink, Level, LogCall, Location};
use loglint_rules::default_engine;
use std::path::Path;

fn run(source: &str, config: Config) -> DiagnosticSink {
    Analyzer::builder()
        .root(".")
        .config(config)
        .engine(default_engine())
        .build()
        .unwrap()
        .analyze_source(Path::new("src/service.rs"), source)
        .unwrap()
}

fn summary(sink: &DiagnosticSink) -> Vec<String> {
    sink.diagnostics
        .iter()
        .map(|d| format!("{}:{} {}", d.location.line, d.location.column, d.code))
        .collect()
}

const SOURCE: &str = r#"const READY: &str = "Ready to serve";

fn serve(user: &str, pw: &str, n: u32) {
    log::info!("server started");
    log::info!("Server started!");
    tracing::warn!(username = %user, password = pw, "login attempt");
    tracing::error!("запуск сервера");
    log::debug!("user password: {}", pw);
    info!("deploy finished 🚀");
    log::info!(READY);
    log::info!(format!("processed {} items", n));
    debug!(user);
    log::warn!("{}", user);
}
"#;

#[test]
fn reports_every_rule_in_call_then_rule_order() {
    let sink = run(SOURCE, Config::default());
    insta::assert_debug_snapshot!(summary(&sink), @r#"
    [
        "5:5 LL001",
        "5:5 LL003",
        "6:5 LL005",
        "7:5 LL002",
        "8:5 LL004",
        "9:5 LL003",
        "10:5 LL001",
    ]
    "#);
    assert_eq!(sink.calls_checked, 9);
}

#[test]
fn severities_follow_rule_defaults() {
    let sink = run(SOURCE, Config::default());
    let (errors, warnings, _) = sink.count_by_severity();
    assert_eq!(errors, 2);
    assert_eq!(warnings, 5);
}

#[test]
fn bare_field_names_do_not_hide_the_message() {
    let sink = run(
        r#"fn f(user: &str, password: &str) {
    tracing::info!(user, "Server started");
    tracing::info!(password, "login ok");
}"#,
        Config::default(),
    );
    assert_eq!(sink.calls_checked, 2);
    let codes: Vec<&str> = sink.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["LL001", "LL005"]);
}

#[test]
fn format_arguments_are_not_field_checked() {
    let sink = run(
        "fn f(password: &str) { tracing::info!(\"login for {}\", password); }",
        Config::default(),
    );
    assert_eq!(sink.calls_checked, 1);
    assert!(sink.is_empty());
}

#[test]
fn structured_field_rule_ignores_standard_calls() {
    let sink = run(
        "fn f(pw: &str) { log::info!(password = pw; \"login attempt\"); }",
        Config::default(),
    );
    assert!(sink.is_empty());
}

#[test]
fn disabled_groups_and_severity_overrides() {
    let config = Config::parse(
        r#"
enable_rules = ["lowercase", "special_chars", "sensitive", "sensitive_fields"]

[special_chars]
enabled = false

[sensitive]
severity = "warning"
"#,
    )
    .unwrap();
    let sink = run(SOURCE, config);
    let codes: Vec<&str> = sink.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["LL001", "LL005", "LL004", "LL001"]);
    assert!(!sink.has_errors());
}

#[test]
fn evaluation_is_deterministic() {
    let first = run(SOURCE, Config::default());
    let second = run(SOURCE, Config::default());
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn engine_accepts_unresolved_entries() {
    let engine = default_engine();
    let position = Location::new("src/lib.rs".into(), 7, 3);
    let calls = vec![
        Some(LogCall::standard(Level::Info, "Hello", position.clone())),
        None,
        Some(LogCall::standard(Level::Info, "hello", position.clone())),
    ];
    let sink = engine.run(calls, &Config::default());
    assert_eq!(sink.calls_checked, 2);
    let diagnostics: Vec<&Diagnostic> = sink.diagnostics.iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].location, position);
}

#[test]
fn empty_message_produces_nothing() {
    let config = Config::parse("[sensitive]\nstrict_mode = true\n").unwrap();
    let sink = run("fn f() { info!(\"\"); log::warn!(\"\"); }", config);
    assert_eq!(sink.calls_checked, 2);
    assert!(sink.is_empty());
}

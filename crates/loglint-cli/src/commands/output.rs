//! Output formatting for diagnostics.

use anyhow::Result;
use loglint_core::{Diagnostic, DiagnosticSink, Severity};
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Prints diagnostics in the given format.
///
/// `root` is the analyzed directory; diagnostic paths are relative to it.
pub fn print(sink: &DiagnosticSink, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(sink),
        OutputFormat::Json => return print_json(sink),
        OutputFormat::Compact => print_compact(sink),
        OutputFormat::Pretty => print_pretty(sink, root),
    }
    Ok(())
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(sink: &DiagnosticSink) {
    for diagnostic in &sink.diagnostics {
        println!(
            "{} {} at {}:{}:{}",
            diagnostic.code,
            diagnostic.rule,
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
        );
        println!("  {}: {}", severity_label(diagnostic.severity), diagnostic.message);
        if let Some(suggestion) = &diagnostic.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }
    print_summary(sink);
}

fn print_summary(sink: &DiagnosticSink) {
    let (errors, warnings, infos) = sink.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} call(s) across {} file(s)\x1b[0m",
        sink.calls_checked, sink.files_checked
    );
}

fn print_json(sink: &DiagnosticSink) -> Result<()> {
    let json = serde_json::to_string_pretty(sink)?;
    println!("{json}");
    Ok(())
}

fn print_compact(sink: &DiagnosticSink) {
    for diagnostic in &sink.diagnostics {
        println!("{diagnostic}");
    }
}

/// Renders each diagnostic with a source snippet.
fn print_pretty(sink: &DiagnosticSink, root: &Path) {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode());
    let mut sources: HashMap<PathBuf, String> = HashMap::new();

    for diagnostic in &sink.diagnostics {
        let content = sources
            .entry(diagnostic.location.file.clone())
            .or_insert_with(|| read_source(root, diagnostic));

        let report = diagnostic.to_report(content.clone());
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &report).is_ok() {
            print!("{rendered}");
        } else {
            println!("{diagnostic}");
        }
    }
    print_summary(sink);
}

fn read_source(root: &Path, diagnostic: &Diagnostic) -> String {
    let path = root.join(&diagnostic.location.file);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        tracing::debug!("cannot read {} for rendering: {e}", path.display());
        String::new()
    })
}

//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // loglint: allow(sensitive) reason="keyword is part of a metric name"
//! ```

use std::collections::HashSet;

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule IDs or codes that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    /// Returns true if this directive covers a rule by ID or code.
    #[must_use]
    pub fn covers(&self, rule: &str, code: &str) -> bool {
        self.rules.contains("all") || self.rules.contains(rule) || self.rules.contains(code)
    }
}

/// Checks the given line and the line before it for an allow directive.
///
/// `line` is 1-indexed. A directive names rules by ID (`sensitive`) or code
/// (`LL004`); `all` matches every rule.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule: &str, code: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.covers(rule, code) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line.
///
/// The directive may follow code on the same line (`info!("x"); // loglint: ...`).
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    line.match_indices("//")
        .find_map(|(start, _)| parse_comment(line[start..].trim_start_matches('/').trim()))
}

fn parse_comment(comment: &str) -> Option<AllowDirective> {
    let directive = comment.strip_prefix("loglint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

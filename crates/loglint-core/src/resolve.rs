//! Literal resolution for message and field-key arguments.
//!
//! Rules only make sense against developer-authored literal text, so a
//! call-site is analyzable only when its message argument has a statically
//! known string value. Resolution works on [`ArgExpr`], a syntax-independent
//! view of an argument, so the policy can be tested against synthetic trees.
//!
//! Strategies are tried in a fixed priority order:
//!
//! 1. [`Strategy::Literal`] - a string literal resolves to its decoded text.
//! 2. [`Strategy::NamedConstant`] - a reference to a constant whose
//!    initializer is a single string literal (one level only).
//! 3. [`Strategy::FormatTemplate`] - a recognized formatting call whose first
//!    argument is a string literal resolves to the template text.

use std::collections::HashMap;

/// Formatting callees recognized by default.
pub const DEFAULT_FORMATTERS: &[&str] = &["format", "format_args", "std::format", "alloc::format"];

/// Syntax-independent view of an argument expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgExpr {
    /// A string literal, already unescaped.
    Str(String),
    /// A reference to a named constant.
    Const(String),
    /// A call (function or macro) with its arguments.
    Call {
        /// Callee path, `::`-joined (e.g. `format`, `std::format`).
        callee: String,
        /// Arguments in source order.
        args: Vec<ArgExpr>,
    },
    /// Anything the resolver cannot see through.
    Opaque,
}

impl ArgExpr {
    /// Creates a string literal expression.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Creates a constant reference expression.
    #[must_use]
    pub fn constant(name: impl Into<String>) -> Self {
        Self::Const(name.into())
    }

    /// Creates a call expression.
    #[must_use]
    pub fn call(callee: impl Into<String>, args: Vec<ArgExpr>) -> Self {
        Self::Call {
            callee: callee.into(),
            args,
        }
    }

    fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Looks up the initializer of a named constant.
pub trait ConstLookup {
    /// Returns the initializer expression declared for `name`, if any.
    fn initializer(&self, name: &str) -> Option<&ArgExpr>;
}

/// Constant declarations collected from one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct ConstTable {
    entries: HashMap<String, ArgExpr>,
}

impl ConstTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a constant declaration. Later declarations replace earlier ones.
    pub fn insert(&mut self, name: impl Into<String>, initializer: ArgExpr) {
        self.entries.insert(name.into(), initializer);
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no constants were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConstLookup for ConstTable {
    fn initializer(&self, name: &str) -> Option<&ArgExpr> {
        self.entries.get(name)
    }
}

/// A single resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Direct string literal.
    Literal,
    /// Named constant with a literal initializer.
    NamedConstant,
    /// Recognized formatting call with a literal template.
    FormatTemplate,
}

impl Strategy {
    /// Strategies in priority order.
    pub const ORDER: [Self; 3] = [Self::Literal, Self::NamedConstant, Self::FormatTemplate];
}

/// Resolves argument expressions to compile-time strings.
pub struct Resolver<'a, C: ConstLookup + ?Sized> {
    consts: &'a C,
    formatters: Vec<String>,
}

impl<'a, C: ConstLookup + ?Sized> Resolver<'a, C> {
    /// Creates a resolver with the default formatting callees.
    #[must_use]
    pub fn new(consts: &'a C) -> Self {
        Self {
            consts,
            formatters: DEFAULT_FORMATTERS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Replaces the set of recognized formatting callees.
    #[must_use]
    pub fn with_formatters<I, S>(mut self, formatters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formatters = formatters.into_iter().map(Into::into).collect();
        self
    }

    /// Resolves `expr` to its string value, or `None` if it is not statically known.
    #[must_use]
    pub fn resolve(&self, expr: &ArgExpr) -> Option<String> {
        self.resolve_with_strategy(expr).map(|(value, _)| value)
    }

    /// Resolves `expr` and reports which strategy succeeded.
    #[must_use]
    pub fn resolve_with_strategy(&self, expr: &ArgExpr) -> Option<(String, Strategy)> {
        Strategy::ORDER
            .iter()
            .find_map(|&strategy| self.apply(strategy, expr).map(|v| (v.to_string(), strategy)))
    }

    fn apply<'e>(&'e self, strategy: Strategy, expr: &'e ArgExpr) -> Option<&'e str> {
        match (strategy, expr) {
            (Strategy::Literal, ArgExpr::Str(value)) => Some(value),
            (Strategy::NamedConstant, ArgExpr::Const(name)) => {
                self.consts.initializer(name).and_then(ArgExpr::as_literal)
            }
            (Strategy::FormatTemplate, ArgExpr::Call { callee, args }) => {
                if !self.formatters.iter().any(|f| f == callee) {
                    return None;
                }
                args.first().and_then(ArgExpr::as_literal)
            }
            _ => None,
        }
    }
}

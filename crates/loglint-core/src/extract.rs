//! Extraction of logging call-sites from parsed Rust source.
//!
//! Macro invocations are classified through a [`CallTable`] keyed by
//! `(path prefix, macro name)`. Recognized macro bodies are parsed into
//! directives (`target: ..`), fields (`key = value`, `%value`, `?value`) and
//! positional arguments. The first positional argument is the message,
//! except that structured loggers treat a bare `name` followed by more
//! positional arguments as a field. Format arguments after the message of a
//! structured call are kept as [`FieldValue::Opaque`] fields.
//! A call-site whose message does not resolve to a literal is skipped.

use crate::call::{Field, FieldValue, Level, LogCall, LoggerKind};
use crate::config::Config;
use crate::context::FileContext;
use crate::resolve::{ArgExpr, ConstTable, Resolver};
use crate::utils::paths::{path_to_string, split_last_segment};
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::parse::discouraged::Speculative;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::visit::Visit;
use syn::{Expr, ExprLit, Ident, ItemConst, Lit, LitStr, Member, Token};
use tracing::{debug, trace};

/// Lookup table from macro path to logger kind and level.
#[derive(Debug, Clone)]
pub struct CallTable {
    entries: HashMap<(String, String), (LoggerKind, Level)>,
}

impl Default for CallTable {
    /// `log::*` is standard; `tracing::*` and bare level macros are structured.
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("log", LoggerKind::Standard);
        table.register("tracing", LoggerKind::Structured);
        table.register("", LoggerKind::Structured);
        table
    }
}

impl CallTable {
    /// Creates a table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates the default table extended with the configured logger aliases.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut table = Self::default();
        for logger in &config.loggers {
            table.register(&logger.alias, logger.kind);
        }
        table
    }

    /// Maps `alias::{debug,info,warn,error}` to `kind`.
    ///
    /// An empty alias registers the bare macro names.
    pub fn register(&mut self, alias: &str, kind: LoggerKind) {
        for level in Level::ALL {
            self.entries
                .insert((alias.to_string(), level.as_str().to_string()), (kind, level));
        }
    }

    /// Classifies a `::`-joined macro path.
    #[must_use]
    pub fn classify(&self, path: &str) -> Option<(LoggerKind, Level)> {
        let (alias, name) = split_last_segment(path);
        self.entries
            .get(&(alias.to_string(), name.to_string()))
            .copied()
    }
}

/// Pulls [`LogCall`]s out of a parsed file.
#[derive(Debug, Clone)]
pub struct CallExtractor {
    table: CallTable,
    formatters: Vec<String>,
}

impl Default for CallExtractor {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CallExtractor {
    /// Creates an extractor from an explicit table and formatter list.
    #[must_use]
    pub fn new(table: CallTable, formatters: Vec<String>) -> Self {
        Self { table, formatters }
    }

    /// Creates an extractor using the configured loggers and formatters.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CallTable::from_config(config),
            config.analyzer.formatters.clone(),
        )
    }

    /// Returns all resolvable call-sites in source order.
    #[must_use]
    pub fn extract(&self, ctx: &FileContext<'_>, ast: &syn::File) -> Vec<LogCall> {
        let mut consts = ConstCollector::default();
        consts.visit_file(ast);

        let resolver = Resolver::new(&consts.table).with_formatters(&self.formatters);
        let mut visitor = CallVisitor {
            ctx,
            table: &self.table,
            resolver,
            calls: Vec::new(),
        };
        visitor.visit_file(ast);
        visitor.calls
    }
}

#[derive(Default)]
struct ConstCollector {
    table: ConstTable,
}

impl<'ast> Visit<'ast> for ConstCollector {
    fn visit_item_const(&mut self, node: &'ast ItemConst) {
        self.table
            .insert(node.ident.to_string(), to_arg_expr(&node.expr));
        syn::visit::visit_item_const(self, node);
    }
}

struct CallVisitor<'a> {
    ctx: &'a FileContext<'a>,
    table: &'a CallTable,
    resolver: Resolver<'a, ConstTable>,
    calls: Vec<LogCall>,
}

impl CallVisitor<'_> {
    fn call_site(&self, node: &syn::Macro) -> Option<LogCall> {
        let path = path_to_string(&node.path);
        let (kind, level) = self.table.classify(&path)?;

        let args = match node.parse_body::<MacroArgs>() {
            Ok(args) => args.0,
            Err(e) => {
                debug!(
                    "skipping {path}! in {}: unparseable arguments ({e})",
                    self.ctx.relative_path.display()
                );
                return None;
            }
        };

        let message_index = message_index(&args, kind)?;
        let MacroArg::Positional(message) = &args[message_index] else {
            return None;
        };
        let Some(message) = self.resolver.resolve(&to_arg_expr(message)) else {
            trace!("skipping {path}! with a non-literal message");
            return None;
        };

        let position = self.ctx.location(node.path.span());
        Some(match kind {
            LoggerKind::Standard => LogCall::standard(level, message, position),
            LoggerKind::Structured => {
                let (before, after) = args.split_at(message_index);
                let fields = before
                    .iter()
                    .filter_map(|arg| match arg {
                        MacroArg::Field(key) => {
                            Some(Field::new(key.clone(), FieldValue::Constructor))
                        }
                        MacroArg::Positional(expr) => {
                            Some(Field::new(shorthand_key(expr), FieldValue::Constructor))
                        }
                        MacroArg::Directive => None,
                    })
                    .chain(after[1..].iter().filter_map(|arg| match arg {
                        MacroArg::Positional(expr) => {
                            Some(Field::new(shorthand_key(expr), FieldValue::Opaque))
                        }
                        _ => None,
                    }))
                    .collect();
                LogCall::structured(level, message, fields, position)
            }
        })
    }
}

/// Index of the message argument.
///
/// For structured loggers a bare `name` or `a.b` followed by another
/// positional argument is a field shorthand, not the message.
fn message_index(args: &[MacroArg], kind: LoggerKind) -> Option<usize> {
    let positional: Vec<usize> = args
        .iter()
        .enumerate()
        .filter(|(_, arg)| matches!(arg, MacroArg::Positional(_)))
        .map(|(i, _)| i)
        .collect();

    match kind {
        LoggerKind::Standard => positional.first().copied(),
        LoggerKind::Structured => {
            let last = *positional.last()?;
            positional.into_iter().find(|&i| match &args[i] {
                MacroArg::Positional(expr) => i == last || shorthand_key(expr).is_none(),
                _ => false,
            })
        }
    }
}

impl<'ast> Visit<'ast> for CallVisitor<'_> {
    fn visit_macro(&mut self, node: &'ast syn::Macro) {
        if let Some(call) = self.call_site(node) {
            self.calls.push(call);
        }
        syn::visit::visit_macro(self, node);
    }
}

/// One comma- or semicolon-separated item of a logging macro body.
enum MacroArg {
    /// `target: expr`, `parent: expr`, `name: expr`.
    Directive,
    /// `key = value`, `key = %value`, `%value`, `?value`; key when derivable.
    Field(Option<String>),
    /// A plain expression (message or format argument).
    Positional(Expr),
}

struct MacroArgs(Vec<MacroArg>);

impl Parse for MacroArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Vec::new();
        while !input.is_empty() {
            args.push(input.parse()?);
            if input.is_empty() {
                break;
            }
            if input.peek(Token![;]) {
                input.parse::<Token![;]>()?;
            } else {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(Self(args))
    }
}

impl Parse for MacroArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Ident) && input.peek2(Token![:]) && !input.peek2(Token![::]) {
            input.parse::<Ident>()?;
            input.parse::<Token![:]>()?;
            input.parse::<Expr>()?;
            return Ok(Self::Directive);
        }

        if input.peek(Token![%]) || input.peek(Token![?]) {
            skip_sigil(input)?;
            let value: Expr = input.parse()?;
            return Ok(Self::Field(shorthand_key(&value)));
        }

        if let Some(key) = field_key(input) {
            skip_sigil(input)?;
            input.parse::<Expr>()?;
            return Ok(Self::Field(Some(key)));
        }

        Ok(Self::Positional(input.parse()?))
    }
}

fn skip_sigil(input: ParseStream) -> syn::Result<()> {
    if input.peek(Token![%]) {
        input.parse::<Token![%]>()?;
    } else if input.peek(Token![?]) {
        input.parse::<Token![?]>()?;
    }
    Ok(())
}

/// Parses `key =` (dotted ident or string key) and advances past it.
fn field_key(input: ParseStream) -> Option<String> {
    let fork = input.fork();
    let key = if fork.peek(LitStr) {
        fork.parse::<LitStr>().ok()?.value()
    } else {
        dotted_ident(&fork).ok()?
    };
    if !fork.peek(Token![=]) || fork.peek(Token![==]) || fork.peek(Token![=>]) {
        return None;
    }
    fork.parse::<Token![=]>().ok()?;
    input.advance_to(&fork);
    Some(key)
}

fn dotted_ident(input: ParseStream) -> syn::Result<String> {
    let mut key = Ident::parse_any(input)?.unraw().to_string();
    while input.peek(Token![.]) && !input.peek(Token![..]) {
        input.parse::<Token![.]>()?;
        key.push('.');
        key.push_str(&Ident::parse_any(input)?.unraw().to_string());
    }
    Ok(key)
}

/// Field name implied by `%expr`/`?expr`: a variable or a named field chain.
fn shorthand_key(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(p) if p.qself.is_none() => p.path.get_ident().map(|i| i.unraw().to_string()),
        Expr::Field(f) => {
            let Member::Named(member) = &f.member else {
                return None;
            };
            let base = shorthand_key(&f.base)?;
            Some(format!("{base}.{}", member.unraw()))
        }
        _ => None,
    }
}

/// Lowers a syn expression to the resolver's view.
fn to_arg_expr(expr: &Expr) -> ArgExpr {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => ArgExpr::Str(s.value()),
        Expr::Path(p) if p.qself.is_none() => p
            .path
            .get_ident()
            .map_or(ArgExpr::Opaque, |ident| ArgExpr::Const(ident.to_string())),
        Expr::Macro(m) => {
            let args = m
                .mac
                .parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
                .map(|args| args.iter().map(to_arg_expr).collect())
                .unwrap_or_default();
            ArgExpr::call(path_to_string(&m.mac.path), args)
        }
        Expr::Call(c) => match &*c.func {
            Expr::Path(p) if p.qself.is_none() => ArgExpr::call(
                path_to_string(&p.path),
                c.args.iter().map(to_arg_expr).collect(),
            ),
            _ => ArgExpr::Opaque,
        },
        Expr::Paren(p) => to_arg_expr(&p.expr),
        Expr::Group(g) => to_arg_expr(&g.expr),
        _ => ArgExpr::Opaque,
    }
}

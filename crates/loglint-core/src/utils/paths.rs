//! Helpers for macro paths such as `tracing::info`.

use syn::Path;

/// Joins the segments of a macro path with `::`, dropping any leading `::`.
#[must_use]
pub fn path_to_string(path: &Path) -> String {
    let mut joined = String::new();
    for (i, segment) in path.segments.iter().enumerate() {
        if i > 0 {
            joined.push_str("::");
        }
        joined.push_str(&segment.ident.to_string());
    }
    joined
}

/// Splits a `::`-joined path into its prefix and last segment.
///
/// The prefix is empty for single-segment paths.
#[must_use]
pub fn split_last_segment(path: &str) -> (&str, &str) {
    path.rsplit_once("::").unwrap_or(("", path))
}

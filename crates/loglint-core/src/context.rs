//! Per-file context used while extracting call-sites.

use crate::types::Location;
use std::path::{Path, PathBuf};

/// A source file being analyzed.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root; used in every reported location.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Builds a location for a span in this file, including its byte offset.
    #[must_use]
    pub fn location(&self, span: proc_macro2::Span) -> Location {
        let location = Location::from_span(self.relative_path.clone(), span);
        let start = self.offset_for(location.line, location.column);
        let end = span.end();
        let length = if end.line == location.line {
            (end.column + 1).saturating_sub(location.column)
        } else {
            0
        };
        location.with_span(start, length)
    }

    /// Byte offset of a 1-indexed line and character column.
    ///
    /// Lines past the end clamp to the file length; line 0 maps to 0.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        let Some(index) = line.checked_sub(1) else {
            return 0;
        };

        let preceding: usize = self
            .content
            .split_inclusive('\n')
            .take(index)
            .map(str::len)
            .sum();

        let within = self
            .content
            .get(preceding..)
            .and_then(|rest| rest.lines().next())
            .map_or(0, |text| {
                text.chars()
                    .take(column.saturating_sub(1))
                    .map(char::len_utf8)
                    .sum()
            });

        preceding + within
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root() {
        let ctx = FileContext::new(
            Path::new("/project/src/main.rs"),
            "",
            Path::new("/project"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("src/main.rs"));

        let outside = FileContext::new(Path::new("/other/lib.rs"), "", Path::new("/project"));
        assert_eq!(outside.relative_path, PathBuf::from("/other/lib.rs"));
    }

    #[test]
    fn offsets_follow_lines() {
        let ctx = FileContext::new(Path::new("a.rs"), "alpha\nbeta\r\ngamma", Path::new(""));

        assert_eq!(ctx.offset_for(0, 4), 0);
        assert_eq!(ctx.offset_for(1, 1), 0);
        assert_eq!(ctx.offset_for(2, 3), 8);
        assert_eq!(ctx.offset_for(3, 1), 12);
        assert_eq!(ctx.offset_for(9, 1), 17);
    }

    #[test]
    fn offset_counts_multibyte_columns() {
        let ctx = FileContext::new(Path::new("test.rs"), "// é\nlet é = 1;", Path::new(""));
        // line 1 is 5 bytes plus newline; `let é` is 6 bytes
        assert_eq!(ctx.offset_for(2, 6), 12);
    }
}

//! Lexical line scanning.
//!
//! The decoder never looks at the raw document twice: [`scan`] splits it
//! once into [`Line`]s carrying the leading-space count and the de-indented
//! text, and [`detect_indent_unit`] infers how many columns one nesting
//! level occupies in this particular document. Everything downstream works
//! in terms of those two results.

/// One line of the input document, annotated for the block decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// Count of leading space characters.
    pub indent: usize,
    /// The line with leading spaces removed.
    pub content: &'a str,
}

impl Line<'_> {
    /// Blank lines terminate blocks; they never carry content.
    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }
}

/// Splits the document on `\n` and annotates each line.
///
/// A single trailing `\r` is stripped per line so CRLF input scans the same
/// as LF input. Indentation is counted in space characters only.
pub(crate) fn scan(text: &str) -> Vec<Line<'_>> {
    text.split('\n')
        .map(|raw| {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let content = raw.trim_start_matches(' ');
            Line {
                indent: raw.len() - content.len(),
                content,
            }
        })
        .collect()
}

/// Infers the document's columns-per-nesting-level.
///
/// Scans lines in order, skipping blanks, and returns the first positive
/// indentation increase. A document that never indents (flat or single
/// line) gets the conventional unit of 2.
pub(crate) fn detect_indent_unit(lines: &[Line<'_>]) -> usize {
    let mut prev = 0;
    for line in lines {
        if line.is_blank() {
            continue;
        }
        if line.indent > prev {
            return line.indent - prev;
        }
        prev = line.indent;
    }
    2
}

//! Multi-line block extraction and normalization
//!
//! Two block forms exist: indentation-delimited blocks (everything deeper than
//! an anchor line) and fence-delimited blocks (everything up to a closing
//! triple backtick). Both are normalized to a canonical left margin.

use crate::lines::{indent_of, is_blank, SourceLines};

/// Fence marker opening and closing a delimited block
pub const FENCE: &str = "```";

/// Lines consumed by a block and the position after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Consumed lines with trailing whitespace removed
    pub lines: Vec<&'a str>,

    /// Index of the first line not consumed by the block
    pub next: usize,
}

impl Block<'_> {
    /// Normalized text of the block
    pub fn text(&self) -> String {
        normalize(&self.lines)
    }
}

/// Consume lines indented deeper than `anchor`, starting at `start`
///
/// Blank lines are consumed as empty lines. The first non-blank line at or
/// above the anchor ends the block and is left for the caller.
pub fn indented_block<'a>(source: &SourceLines<'a>, start: usize, anchor: usize) -> Block<'a> {
    let mut lines = Vec::new();
    let mut index = start;

    while let Some(raw) = source.raw(index) {
        if is_blank(raw) {
            lines.push("");
        } else if indent_of(raw) <= anchor {
            break;
        } else {
            lines.push(raw.trim_end());
        }
        index += 1;
    }

    Block { lines, next: index }
}

/// Consume lines verbatim from `start` until a line that is exactly [`FENCE`]
///
/// The closing fence is consumed but not included. Without a closing fence
/// the block runs to the end of the document.
pub fn fenced_block<'a>(source: &SourceLines<'a>, start: usize) -> Block<'a> {
    let mut lines = Vec::new();
    let mut index = start;

    while let Some(raw) = source.raw(index) {
        index += 1;
        if raw.trim() == FENCE {
            break;
        }
        lines.push(raw.trim_end());
    }

    Block { lines, next: index }
}

/// Strip the common leading tabs from non-blank lines and join with `\n`
///
/// Blank lines become empty strings. A block with no content at all
/// normalizes to an empty string.
pub fn normalize<S: AsRef<str>>(lines: &[S]) -> String {
    let margin = lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|line| !is_blank(line))
        .map(indent_of)
        .min();

    let Some(margin) = margin else {
        return String::new();
    };

    lines
        .iter()
        .map(|line| {
            let line: &str = line.as_ref();
            if is_blank(line) {
                ""
            } else {
                &line[margin..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

//! Indentation tokenizer
//!
//! TMDL nests by tab characters: one leading tab is one indentation level.
//! Blank lines never become tokens but keep their position, because block
//! extraction reads raw lines (blanks included) by index.

/// A non-blank line with its indentation level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Zero-based line index in the backing line list
    pub line: usize,

    /// Number of leading tab characters
    pub indent: usize,

    /// Line content with surrounding whitespace trimmed
    pub content: &'a str,
}

/// Backing line list of one TMDL document
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    /// Split a document into lines (`\n` or `\r\n`), dropping a leading BOM
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().collect(),
        }
    }

    /// Number of raw lines, blanks included
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw line at an index
    pub fn raw(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    /// Token at an index, `None` for blank lines and out-of-range indexes
    pub fn token(&self, index: usize) -> Option<Token<'a>> {
        let raw = self.raw(index)?;
        if is_blank(raw) {
            return None;
        }

        Some(Token {
            line: index,
            indent: indent_of(raw),
            content: raw.trim(),
        })
    }

    /// All tokens in document order
    pub fn tokens(&self) -> impl Iterator<Item = Token<'a>> + '_ {
        (0..self.lines.len()).filter_map(|index| self.token(index))
    }
}

/// Count leading tab characters
pub fn indent_of(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b'\t').count()
}

/// Whether a line is empty or whitespace only
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

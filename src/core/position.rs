// LogTint - core/position.rs
//
// Offset conversion for consumers that do not address text by UTF-8 byte.
//
// Spans are byte offsets. Editor hosts want line/column or UTF-16 offsets,
// other consumers want Unicode scalar (char) offsets. `OffsetIndex`
// pre-computes line starts once per text so each conversion is a binary
// search plus a scan of a single line.
//
// Line breaks are `\n`, `\r\n` and a bare `\r`.

use std::fmt;

/// Zero-based line and column. The column is counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line-start table over one text.
#[derive(Debug, Clone)]
pub struct OffsetIndex<'a> {
    text: &'a str,
    /// Byte offset of each line start.
    line_starts: Vec<usize>,
    /// Char offset of each line start.
    line_char_starts: Vec<usize>,
    /// UTF-16 offset of each line start.
    line_utf16_starts: Vec<usize>,
}

impl<'a> OffsetIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = line_starts(text);
        let mut line_char_starts = Vec::with_capacity(line_starts.len());
        let mut line_utf16_starts = Vec::with_capacity(line_starts.len());
        let mut chars = 0usize;
        let mut utf16 = 0usize;
        let mut previous = 0usize;

        for &start in &line_starts {
            let chunk = &text[previous..start];
            chars += chunk.chars().count();
            utf16 += chunk.encode_utf16().count();
            line_char_starts.push(chars);
            line_utf16_starts.push(utf16);
            previous = start;
        }

        Self {
            text,
            line_starts,
            line_char_starts,
            line_utf16_starts,
        }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line and char column of a byte offset.
    ///
    /// Offsets past the end clamp to the end; offsets inside a multi-byte
    /// char resolve to that char.
    pub fn position(&self, byte: usize) -> Position {
        let byte = self.floor_boundary(byte);
        let line = self.line_of(byte);
        let column = self.text[self.line_starts[line]..byte].chars().count();
        Position::new(line, column)
    }

    /// Char (Unicode scalar) offset of a byte offset.
    pub fn char_offset(&self, byte: usize) -> usize {
        let pos = self.position(byte);
        self.line_char_starts[pos.line] + pos.column
    }

    /// UTF-16 code unit offset of a byte offset.
    pub fn utf16_offset(&self, byte: usize) -> usize {
        let byte = self.floor_boundary(byte);
        let line = self.line_of(byte);
        let in_line: usize = self.text[self.line_starts[line]..byte]
            .chars()
            .map(char::len_utf16)
            .sum();
        self.line_utf16_starts[line] + in_line
    }

    fn line_of(&self, byte: usize) -> usize {
        match self.line_starts.binary_search(&byte) {
            Ok(line) => line,
            // line_starts[0] == 0, so Err(0) cannot happen.
            Err(next) => next - 1,
        }
    }

    fn floor_boundary(&self, byte: usize) -> usize {
        let mut b = byte.min(self.text.len());
        while !self.text.is_char_boundary(b) {
            b -= 1;
        }
        b
    }
}

/// Byte offset of the start of every line in `text`.
///
/// The first entry is always 0. A `\r\n` pair is one break; a trailing
/// break opens an empty last line.
pub fn line_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = vec![0];
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\n' => starts.push(i + 1),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
            _ => {}
        }
    }
    starts
}

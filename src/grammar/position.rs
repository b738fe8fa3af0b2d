use std::fmt::{self, Display};

/// A location in the grammar source, reported with errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset into the source.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in chars.
    pub column: usize,
}

impl Position {
    /// Compute the line and column of a byte offset within `input`.
    pub fn locate(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Position {
            offset,
            line,
            column,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Keep track of a position within a str, updating on successful operations.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    idx: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, idx: 0 }
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.idx..]
    }

    pub fn is_empty(&self) -> bool {
        self.idx >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look at the char after the next one.
    pub fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Check if a string matches the current input starting at the current
    /// index. The index will be updated on match.
    pub fn match_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.idx += s.len();
            true
        } else {
            false
        }
    }

    /// Consume a single char if it's the next one in the input.
    pub fn match_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.idx += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Move the cursor so that `rest` becomes the remaining input. `rest` must
    /// be a suffix of the current remainder, as returned by a sub-parser.
    pub fn advance_to(&mut self, rest: &'a str) {
        debug_assert!(rest.len() <= self.rest().len());
        self.idx = self.input.len() - rest.len();
    }

    pub fn offset(&self) -> usize {
        self.idx
    }

    pub fn position_at(&self, offset: usize) -> Position {
        Position::locate(self.input, offset)
    }
}

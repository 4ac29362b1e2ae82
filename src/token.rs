//! Lexical tokens for systemd-style configuration files.
//!
//! The scanner turns a byte buffer into a stream of [`Token`]s, each tagged
//! with the [`Position`] it started at. Seven kinds cover the whole grammar:
//! section headers, bare strings, the `=` operator, newlines, comments and
//! the end-of-input marker.
//!
//! ## Examples
//!
//! ```rust
//! use systemd_unit::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new(b"[Match]\nName=eth0\n");
//! let token = scanner.scan();
//! assert_eq!(token.kind, TokenKind::Section);
//! assert_eq!(token.literal, "[Match]");
//! ```

use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A character sequence the scanner could not classify.
    Illegal,
    /// End of input.
    Eof,
    /// A `#` or `;` comment running to the end of the line.
    Comment,

    /// A bracketed section header, e.g. `[Network]`.
    Section,
    /// Everything that does not fit elsewhere: key names and value fragments.
    String,

    /// `\n`
    Newline,
    /// `=`
    Assign,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Comment => "COMMENT",
            TokenKind::Section => "SECTION",
            TokenKind::String => "STRING",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Assign => "=",
        };
        f.write_str(s)
    }
}

/// A token together with its starting position and raw literal.
///
/// The literal is empty for [`TokenKind::Newline`], [`TokenKind::Assign`]
/// and [`TokenKind::Eof`]. Section literals include the brackets, comment
/// literals include the leading marker character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
    pub literal: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, pos: Position) -> Self {
        Token {
            kind,
            pos,
            literal: String::new(),
        }
    }

    pub(crate) fn with_literal(kind: TokenKind, pos: Position, literal: String) -> Self {
        Token { kind, pos, literal }
    }
}

/// A line/column pair, 1-based.
///
/// `column == 0` means no column information is available; such positions
/// display as the bare line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// A position is valid once it points at a real line.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    /// Formats as `line:column`, bare `line` when no column is known,
    /// or `-` for an invalid position.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("-");
        }
        if self.column == 0 {
            write!(f, "{}", self.line)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Reports whether `ch` terminates a STRING literal.
pub(crate) fn is_delimiter(ch: char) -> bool {
    ch == '\n' || ch == '='
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position { line: 3, column: 7 }.to_string(), "3:7");
        assert_eq!(Position { line: 3, column: 0 }.to_string(), "3");
        assert_eq!(Position { line: 0, column: 0 }.to_string(), "-");
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Assign.to_string(), "=");
        assert_eq!(TokenKind::Section.to_string(), "SECTION");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }
}

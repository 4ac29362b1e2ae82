//! Character scanner for systemd-style configuration files.
//!
//! [`Scanner`] takes a byte buffer and tokenizes it through repeated calls
//! to [`Scanner::scan`]. Scanning never backtracks and never aborts:
//! character-level problems (invalid UTF-8, embedded NUL) are reported
//! through an optional error handler, counted, and replaced with U+FFFD so
//! the token stream stays usable.
//!
//! ## Usage
//!
//! ```rust
//! use systemd_unit::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new(b"Name=eth0");
//! loop {
//!     let token = scanner.scan();
//!     if token.kind == TokenKind::Eof {
//!         break;
//!     }
//!     println!("{}\t{}\t{:?}", token.pos, token.kind, token.literal);
//! }
//! assert_eq!(scanner.error_count(), 0);
//! ```

use crate::token::{is_delimiter, Position, Token, TokenKind};

/// Callback invoked for every character-level scan error.
pub type ErrorHandler<'a> = Box<dyn FnMut(Position, &str) + 'a>;

/// A tokenizer over an in-memory byte buffer.
///
/// Each call to [`Scanner::scan`] consumes input and returns the next
/// token; once [`TokenKind::Eof`] is returned the scanner is exhausted.
pub struct Scanner<'a> {
    src: &'a [u8],
    pos: Position,
    handler: Option<ErrorHandler<'a>>,

    // scanning state
    ch: Option<char>, // current character, None at EOF
    offset: usize,    // offset of the current character
    rd_offset: usize, // reading offset, one past the current character

    error_count: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `src` without an error handler.
    /// Errors are still counted.
    #[must_use]
    pub fn new(src: &'a [u8]) -> Self {
        Self::with_handler(src, None)
    }

    /// Creates a scanner over `src` that reports character-level errors
    /// to `handler`.
    #[must_use]
    pub fn with_handler(src: &'a [u8], handler: Option<ErrorHandler<'a>>) -> Self {
        let mut s = Scanner {
            src,
            pos: Position { line: 1, column: 0 },
            handler,
            ch: Some(' '),
            offset: 0,
            rd_offset: 0,
            error_count: 0,
        };
        s.next();
        s
    }

    /// The number of character-level errors encountered so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    fn error(&mut self, msg: &str) {
        if let Some(handler) = self.handler.as_mut() {
            handler(self.pos, msg);
        }
        self.error_count += 1;
    }

    /// Advances to the next character, substituting U+FFFD for NUL bytes
    /// and invalid UTF-8 sequences.
    fn next(&mut self) {
        if self.rd_offset >= self.src.len() {
            self.offset = self.src.len();
            self.ch = None;
            return;
        }

        self.offset = self.rd_offset;
        if self.ch == Some('\n') {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }

        let byte = self.src[self.rd_offset];
        let (ch, width) = if byte == 0 {
            self.error("illegal character NUL");
            (char::REPLACEMENT_CHARACTER, 1)
        } else if byte < 0x80 {
            (byte as char, 1)
        } else {
            match decode_utf8(&self.src[self.rd_offset..]) {
                Some(decoded) => decoded,
                None => {
                    self.error("illegal UTF-8 encoding");
                    (char::REPLACEMENT_CHARACTER, 1)
                }
            }
        };
        self.ch = Some(ch);
        self.rd_offset += width;
    }

    fn scan_string(&mut self, first: char) -> String {
        let mut lit = String::new();
        lit.push(first);
        while let Some(ch) = self.ch {
            if is_delimiter(ch) {
                break;
            }
            lit.push(ch);
            self.next();
        }
        lit
    }

    fn scan_comment(&mut self, marker: char) -> String {
        let mut lit = String::new();
        lit.push(marker);
        while let Some(ch) = self.ch {
            if ch == '\n' {
                break;
            }
            lit.push(ch);
            self.next();
        }
        lit
    }

    fn scan_section(&mut self) -> String {
        let mut lit = String::new();
        lit.push('[');
        while let Some(ch) = self.ch {
            if ch == ']' || ch == '\n' {
                break;
            }
            lit.push(ch);
            self.next();
        }
        if self.ch == Some(']') {
            lit.push(']');
            self.next();
        }
        lit
    }

    /// Returns the next token.
    ///
    /// Whitespace other than `\n` is skipped silently; `\n` is always
    /// emitted as [`TokenKind::Newline`]. Once the input is exhausted every
    /// subsequent call returns [`TokenKind::Eof`].
    pub fn scan(&mut self) -> Token {
        let pos = self.pos;
        loop {
            let ch = self.ch;
            self.next();

            return match ch {
                None => Token::new(TokenKind::Eof, pos),
                Some('\n') => Token::new(TokenKind::Newline, pos),
                Some('[') => {
                    let lit = self.scan_section();
                    Token::with_literal(TokenKind::Section, pos, lit)
                }
                Some(marker @ ('#' | ';')) => {
                    let lit = self.scan_comment(marker);
                    Token::with_literal(TokenKind::Comment, pos, lit)
                }
                Some('=') => Token::new(TokenKind::Assign, pos),
                Some(ch) if ch.is_whitespace() => continue,
                Some(ch) => {
                    let lit = self.scan_string(ch);
                    Token::with_literal(TokenKind::String, pos, lit)
                }
            };
        }
    }
}

/// Decodes the leading UTF-8 sequence of `bytes`, or `None` if it is
/// malformed or truncated.
fn decode_utf8(bytes: &[u8]) -> Option<(char, usize)> {
    let width = match bytes[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return None,
    };
    if bytes.len() < width {
        return None;
    }
    let s = std::str::from_utf8(&bytes[..width]).ok()?;
    let ch = s.chars().next()?;
    Some((ch, width))
}

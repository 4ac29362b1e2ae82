//! Error types for decoding, encoding and schema binding.
//!
//! All fatal errors abort the current top-level call; no partial document
//! or record is ever returned alongside an error. Character-level scan
//! problems are not part of this taxonomy — they are non-fatal, reported
//! through the scanner's error handler and visible as a running count
//! (see [`crate::Scanner::error_count`]).
//!
//! ## Examples
//!
//! ```rust
//! use systemd_unit::decode;
//!
//! let err = decode(b"Name=eth0\n").unwrap_err();
//! // Format errors carry the position of the offending token.
//! assert!(err.to_string().starts_with("1:1:"));
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

use crate::token::Position;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing encoded output.
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed input, fatal to the current decode call.
    #[error("{pos}: {msg}")]
    Format { pos: Position, msg: String },
}

impl Error {
    /// Creates a format error carrying the triggering position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use systemd_unit::{Error, Position};
    ///
    /// let err = Error::format(Position { line: 3, column: 1 }, "something is off");
    /// assert_eq!(err.to_string(), "3:1: something is off");
    /// ```
    pub fn format<T: fmt::Display>(pos: Position, msg: T) -> Self {
        Error::Format {
            pos,
            msg: msg.to_string(),
        }
    }

    /// Creates an I/O error from a display message.
    pub fn io<T: fmt::Display>(msg: T) -> Self {
        Error::Io(msg.to_string())
    }

    /// The position attached to this error, if any.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Format { pos, .. } => Some(*pos),
            Error::Io(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

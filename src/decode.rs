//! Decoding of configuration text into a [`Document`].
//!
//! The decoder is a small state machine over the scanner's token stream.
//! It carries three pieces of state between tokens: the comment lines
//! accumulated for the next attach point, the index of the section new keys
//! are appended to, and the location of the key currently under
//! construction (the "open" key).
//!
//! Comment attachment works through a single pending buffer: comment
//! tokens always append to it, and whichever section or key closes next
//! takes the whole buffer. This is why a comment sitting between the
//! continuation lines of a value ends up merged into that key's comment.
//!
//! ## Usage
//!
//! ```rust
//! use systemd_unit::decode;
//!
//! let document = decode(b"[Network]\nDescription=uplink\n").unwrap();
//! assert_eq!(document.sections[0].keys[0].name, "Description");
//! ```

use crate::document::{Document, Key, Section};
use crate::error::{Error, Result};
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

/// Parses a configuration file into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::Format`] on a malformed section header, on a key
/// outside any section, or on a key name not followed by `=`. The error
/// carries the position of the offending token.
pub fn decode(data: &[u8]) -> Result<Document> {
    Decoder::new(data).decode()
}

/// State of a single decode call.
struct Decoder<'a> {
    scanner: Scanner<'a>,
    /// Comment lines waiting for the next section or key to close.
    comment: String,
    document: Document,
    /// Index of the section receiving new keys.
    section: Option<usize>,
    /// `(section index, key index)` of the open key.
    key: Option<(usize, usize)>,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Decoder {
            scanner: Scanner::new(data),
            comment: String::new(),
            document: Document::default(),
            section: None,
            key: None,
        }
    }

    fn decode(mut self) -> Result<Document> {
        loop {
            let token = self.scanner.scan();
            match token.kind {
                TokenKind::Comment => self.add_comment(&token.literal),

                TokenKind::Assign => {
                    // Inside a value, `=` is literal: Environment=FOO=bar
                    // is one logical value after the first assignment.
                    if let Some(key) = self.open_key() {
                        key.value.push('=');
                    }
                }

                TokenKind::Eof => {
                    self.close_key();
                    break;
                }

                TokenKind::Newline => {
                    // A trailing backslash keeps the key open so the next
                    // STRING continues the value.
                    let continues = self
                        .open_key()
                        .map(|key| key.value.ends_with('\\'))
                        .unwrap_or(false);
                    if self.key.is_some() && !continues {
                        self.close_key();
                    }
                }

                TokenKind::String => self.add_string(token)?,

                TokenKind::Section => self.add_section(token)?,

                TokenKind::Illegal => {}
            }
        }
        Ok(self.document)
    }

    fn open_key(&mut self) -> Option<&mut Key> {
        let (section, key) = self.key?;
        Some(&mut self.document.sections[section].keys[key])
    }

    fn add_section(&mut self, token: Token) -> Result<()> {
        let lit = &token.literal;
        if !lit.starts_with('[') {
            return Err(Error::format(
                token.pos,
                format!("section needs to start with [, is: {lit:?}"),
            ));
        }
        if !lit.ends_with(']') {
            return Err(Error::format(
                token.pos,
                format!("section needs to end with ], is: {lit:?}"),
            ));
        }

        self.document.sections.push(Section {
            name: lit[1..lit.len() - 1].to_string(),
            comment: std::mem::take(&mut self.comment),
            keys: Vec::new(),
        });
        self.section = Some(self.document.sections.len() - 1);
        Ok(())
    }

    fn add_string(&mut self, token: Token) -> Result<()> {
        let Some(section) = self.section else {
            return Err(Error::format(
                token.pos,
                format!("key started outside of section {:?}", token.literal),
            ));
        };

        if let Some(key) = self.open_key() {
            // Value fragment.
            key.value.push_str(token.literal.trim());
            return Ok(());
        }

        // Key name: the next token must be the assignment operator.
        let next = self.scanner.scan();
        if next.kind != TokenKind::Assign {
            return Err(Error::format(
                next.pos,
                format!(
                    "key not followed by = (ASSIGN), token found: {} {:?}",
                    next.kind, next.literal
                ),
            ));
        }

        let keys = &mut self.document.sections[section].keys;
        keys.push(Key {
            name: token.literal.trim().to_string(),
            value: String::new(),
            comment: String::new(),
        });
        self.key = Some((section, keys.len() - 1));
        Ok(())
    }

    fn add_comment(&mut self, lit: &str) {
        if !self.comment.is_empty() {
            self.comment.push('\n');
        }
        // Strip the # or ; marker.
        self.comment.push_str(lit[1..].trim());
    }

    /// Closes the open key: attaches the pending comment and normalizes
    /// continuation backslashes to spaces.
    fn close_key(&mut self) {
        let Some((section, key)) = self.key.take() else {
            return;
        };
        let key = &mut self.document.sections[section].keys[key];
        key.comment = std::mem::take(&mut self.comment);
        key.value = key.value.replace('\\', " ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str, value: &str, comment: &str) -> Key {
        Key {
            name: name.to_string(),
            value: value.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_decode_comments_all_over_the_place() {
        let input = "# network comment
[Network]
# start desc
Description= test1 \\
\t# in the middle
\ttest2 \\
\ttest3
# address 1
Address=10.1.10.9/24

# address 2
\t; something else
Address=10.1.10.11/24
";
        let document = decode(input.as_bytes()).unwrap();
        assert_eq!(
            document,
            Document {
                sections: vec![Section {
                    name: "Network".to_string(),
                    comment: "network comment".to_string(),
                    keys: vec![
                        key(
                            "Description",
                            "test1  test2  test3",
                            "start desc\nin the middle",
                        ),
                        key("Address", "10.1.10.9/24", "address 1"),
                        key("Address", "10.1.10.11/24", "address 2\nsomething else"),
                    ],
                }],
            }
        );
    }

    #[test]
    fn test_decode_multiple_sections() {
        let input = "# route1000
# also important
[Route]
Gateway=192.168.0.11
Destination=10.0.0.0/8

# route2000
# this is very important!
[Route]
Gateway=192.168.0.12
Destination=20.0.0.0/8";
        let document = decode(input.as_bytes()).unwrap();
        assert_eq!(
            document,
            Document {
                sections: vec![
                    Section {
                        name: "Route".to_string(),
                        comment: "route1000\nalso important".to_string(),
                        keys: vec![
                            key("Gateway", "192.168.0.11", ""),
                            key("Destination", "10.0.0.0/8", ""),
                        ],
                    },
                    Section {
                        name: "Route".to_string(),
                        comment: "route2000\nthis is very important!".to_string(),
                        keys: vec![
                            key("Gateway", "192.168.0.12", ""),
                            key("Destination", "20.0.0.0/8", ""),
                        ],
                    },
                ],
            }
        );
    }

    #[test]
    fn test_decode_nested_assign() {
        let input = "[Service]
Environment=ETCD_CA_FILE=/path/to/CA.pem
Environment=ETCD_CERT_FILE=/path/to/server.crt
Environment=ETCD_KEY_FILE=/path/to/server.key";
        let document = decode(input.as_bytes()).unwrap();
        assert_eq!(
            document.sections[0].keys,
            vec![
                key("Environment", "ETCD_CA_FILE=/path/to/CA.pem", ""),
                key("Environment", "ETCD_CERT_FILE=/path/to/server.crt", ""),
                key("Environment", "ETCD_KEY_FILE=/path/to/server.key", ""),
            ]
        );
    }

    #[test]
    fn test_decode_section_comment_attachment() {
        let document = decode(b"# a\n# b\n[S]\nK=v\n").unwrap();
        assert_eq!(document.sections[0].comment, "a\nb");
        assert_eq!(document.sections[0].keys[0].comment, "");
    }

    #[test]
    fn test_decode_continuation_with_mid_comment() {
        let document = decode(b"[N]\nD= x1 \\\n# mid\nx2\n").unwrap();
        assert_eq!(
            document.sections[0].keys[0],
            key("D", "x1  x2", "mid")
        );
    }

    #[test]
    fn test_decode_continuation_at_eof_is_closed() {
        let document = decode(b"[N]\nD=x1 \\").unwrap();
        assert_eq!(document.sections[0].keys[0].value, "x1  ");
    }

    #[test]
    fn test_decode_empty_value() {
        let document = decode(b"[N]\nD=\n").unwrap();
        assert_eq!(document.sections[0].keys[0], key("D", "", ""));
    }

    #[test]
    fn test_decode_unterminated_section_fails() {
        let err = decode(b"[Match").unwrap_err();
        assert!(err.to_string().contains("section needs to end with ]"));
    }

    #[test]
    fn test_decode_key_outside_section_fails_with_position() {
        let err = decode(b"X=1\n").unwrap_err();
        assert_eq!(err.position().map(|p| p.line), Some(1));
        assert!(err.to_string().contains("key started outside of section"));
    }

    #[test]
    fn test_decode_key_without_assign_fails() {
        let err = decode(b"[S]\nKey\n").unwrap_err();
        assert!(err
            .to_string()
            .contains("key not followed by = (ASSIGN)"));
    }
}

//! Encoding of a [`Document`] back to canonical text.
//!
//! The encoder writes sections in document order, separated by a blank
//! line. Comments always render with a `# ` prefix, one physical line per
//! logical line, regardless of the marker they were read with. Within a
//! section a blank line is inserted before a commented key unless it is
//! the section's first key — that one sits directly under the header.
//!
//! Blank lines from the input are not preserved verbatim; the rules above
//! are the only source of blank lines in the output.
//!
//! ## Usage
//!
//! ```rust
//! use systemd_unit::{decode, encode};
//!
//! let document = decode(b"[Match]\nName=eth0\n").unwrap();
//! let mut out = Vec::new();
//! encode(&document, &mut out).unwrap();
//! assert_eq!(out, b"[Match]\nName=eth0\n");
//! ```

use std::io::Write;

use crate::document::{Document, Key, Section};
use crate::error::Result;

/// Writes the canonical text form of `document` to `out`.
///
/// # Errors
///
/// Fails only if the underlying writer fails.
pub fn encode<W: Write>(document: &Document, out: &mut W) -> Result<()> {
    for (i, section) in document.sections.iter().enumerate() {
        if i != 0 {
            out.write_all(b"\n")?;
        }
        write_section(out, section)?;
    }
    Ok(())
}

/// Convenience wrapper encoding into a fresh buffer.
pub fn encode_to_vec(document: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode(document, &mut buf)?;
    Ok(buf)
}

fn write_section<W: Write>(out: &mut W, section: &Section) -> Result<()> {
    write_comment(out, &section.comment)?;
    writeln!(out, "[{}]", section.name)?;
    for (i, key) in section.keys.iter().enumerate() {
        if i != 0 && !key.comment.is_empty() {
            out.write_all(b"\n")?;
        }
        write_key(out, key)?;
    }
    Ok(())
}

fn write_key<W: Write>(out: &mut W, key: &Key) -> Result<()> {
    write_comment(out, &key.comment)?;
    writeln!(out, "{}={}", key.name, key.value)?;
    Ok(())
}

fn write_comment<W: Write>(out: &mut W, comment: &str) -> Result<()> {
    if comment.is_empty() {
        return Ok(());
    }
    for line in comment.split('\n') {
        writeln!(out, "# {line}")?;
    }
    Ok(())
}

//! # systemd_unit
//!
//! A lossless round-trip codec for systemd-style unit and network
//! configuration files: bracketed section headers, `Name=Value` lines,
//! `#`/`;` comments and backslash line continuation.
//!
//! ## What it does
//!
//! - **Decode**: parse configuration text into a generic [`Document`] of
//!   ordered sections and keys, with comments attached to the section or
//!   key they precede — including comments interleaved with continuation
//!   lines.
//! - **Encode**: serialize a [`Document`] back to canonical text. Section
//!   and key order is preserved exactly; comments render as `# ` blocks.
//! - **Bind**: map documents onto statically declared record types and
//!   back via [`marshal`]/[`unmarshal`], preserving comments and unknown
//!   fields through opt-in sinks.
//!
//! ## Quick Start
//!
//! ```rust
//! use systemd_unit::{decode, encode};
//!
//! let text = b"# uplink port
//! [Match]
//! Name=eth0
//!
//! [Network]
//! DHCP=ipv4
//! ";
//!
//! let document = decode(text).unwrap();
//! assert_eq!(document.sections[0].comment, "uplink port");
//!
//! let mut out = Vec::new();
//! encode(&document, &mut out).unwrap();
//! assert_eq!(out, text);
//! ```
//!
//! ## Schema binding
//!
//! Record types declare their fields in static descriptor tables (see
//! [`UnitSection`] and [`UnitFile`]); the binder walks those tables in
//! declaration order, so output layout is fully determined by the
//! declaration. [`crate::network`] ships ready-made records for the
//! `.network` dialect:
//!
//! ```rust
//! use systemd_unit::network::Network;
//! use systemd_unit::{marshal, unmarshal};
//!
//! let mut network = Network::default();
//! unmarshal(b"[Match]\nName=eth0\n", &mut network).unwrap();
//! assert_eq!(network.match_rules.as_ref().unwrap().name, "eth0");
//!
//! let bytes = marshal(&network).unwrap();
//! assert_eq!(bytes, b"[Match]\nName=eth0\n");
//! ```
//!
//! ## Fidelity notes
//!
//! Round trips are byte-exact with two deliberate exceptions: comments
//! always re-render with a `# ` marker regardless of the one they were
//! read with, and continuation backslashes are folded into spaces when a
//! value is assembled (`\` is not round-trip-stable by design). Input
//! blank lines are not preserved verbatim — the encoder re-derives them
//! from its own layout rules.

pub mod bind;
pub mod decode;
pub mod document;
pub mod encode;
pub mod error;
pub mod network;
pub mod scanner;
pub mod schema;
pub mod token;

pub use bind::{apply_document, marshal, to_document, unmarshal, Ignored, IgnoredKey};
pub use decode::decode;
pub use document::{Document, Key, Section};
pub use encode::{encode, encode_to_vec};
pub use error::{Error, Result};
pub use scanner::{ErrorHandler, Scanner};
pub use schema::{
    bool_str, parse_bool, KeyAccess, KeyComments, KeySpec, Multiple, Optional, SectionBinding,
    Single, UnitFile, UnitSection,
};
pub use token::{Position, Token, TokenKind};

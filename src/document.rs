//! The generic document model.
//!
//! A [`Document`] is the lossless in-memory form of a configuration file:
//! an ordered list of [`Section`]s, each holding an ordered list of
//! [`Key`]s. Order is file order and is never changed by this crate —
//! systemd-style consumers give it meaning (first match wins), and the
//! encoder reproduces it verbatim.
//!
//! Comments are carried as multi-line strings joined with `\n`, without
//! marker characters. An empty comment string means no comment was
//! attached.
//!
//! ## Examples
//!
//! ```rust
//! use systemd_unit::decode;
//!
//! let document = decode(b"# eth0 config\n[Match]\nName=eth0\n").unwrap();
//! assert_eq!(document.sections[0].name, "Match");
//! assert_eq!(document.sections[0].comment, "eth0 config");
//! assert_eq!(document.sections[0].keys[0].value, "eth0");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encode::encode;

/// An ordered sequence of sections, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    /// Returns every section named `name`, preserving document order.
    #[must_use]
    pub fn sections_by_name<'a>(&'a self, name: &str) -> Vec<&'a Section> {
        self.sections
            .iter()
            .filter(|section| section.name == name)
            .collect()
    }
}

impl fmt::Display for Document {
    /// Renders the canonical text form, as produced by [`encode`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        encode(self, &mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

/// A named group of keys delimited by a bracketed header line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Comment lines attached above the header, `\n`-joined, no markers.
    pub comment: String,
    pub keys: Vec<Key>,
}

impl Section {
    /// Returns every key named `name`, preserving section order.
    #[must_use]
    pub fn keys_by_name<'a>(&'a self, name: &str) -> Vec<&'a Key> {
        self.keys.iter().filter(|key| key.name == name).collect()
    }
}

/// A `Name=Value` pair within a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub name: String,
    pub value: String,
    /// Comment lines attached above the key, `\n`-joined, no markers.
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            sections: vec![
                Section {
                    name: "Route".to_string(),
                    comment: String::new(),
                    keys: vec![
                        Key {
                            name: "Gateway".to_string(),
                            value: "192.168.0.11".to_string(),
                            comment: String::new(),
                        },
                        Key {
                            name: "Gateway".to_string(),
                            value: "192.168.0.12".to_string(),
                            comment: String::new(),
                        },
                    ],
                },
                Section {
                    name: "Network".to_string(),
                    comment: String::new(),
                    keys: vec![],
                },
                Section {
                    name: "Route".to_string(),
                    comment: String::new(),
                    keys: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_sections_by_name_preserves_order() {
        let document = sample();
        let routes = document.sections_by_name("Route");
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].keys.len(), 2);
        assert!(document.sections_by_name("DHCPv4").is_empty());
    }

    #[test]
    fn test_keys_by_name_preserves_order() {
        let document = sample();
        let gateways = document.sections[0].keys_by_name("Gateway");
        assert_eq!(gateways.len(), 2);
        assert_eq!(gateways[0].value, "192.168.0.11");
        assert_eq!(gateways[1].value, "192.168.0.12");
    }

    #[test]
    fn test_display_matches_encode() {
        let document = sample();
        assert_eq!(
            document.to_string(),
            "[Route]\nGateway=192.168.0.11\nGateway=192.168.0.12\n\n[Network]\n\n[Route]\n"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let document = sample();
        let json = serde_json::to_string(&document).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(document, back);
    }
}

//! The generic marshal/unmarshal engine.
//!
//! [`marshal`] walks a file record's section table in declaration order,
//! assembles a [`Document`] and hands it to the encoder. [`unmarshal`]
//! decodes a document and distributes its sections and keys over the
//! declared fields by canonical name.
//!
//! Anything in the document that matches no declared field goes to the
//! record's unknown-section/unknown-key sink if it has one; otherwise it
//! is collected into the returned [`Ignored`] report so dropped input is
//! always observable.
//!
//! ## Usage
//!
//! ```rust
//! use systemd_unit::network::Network;
//! use systemd_unit::unmarshal;
//!
//! let mut network = Network::default();
//! let ignored = unmarshal(b"[Match]\nName=eth0\n", &mut network).unwrap();
//! assert!(ignored.is_empty());
//! assert_eq!(network.match_rules.unwrap().name, "eth0");
//! ```

use std::collections::HashSet;

use crate::decode::decode;
use crate::document::{Document, Key, Section};
use crate::encode::encode;
use crate::error::Result;
use crate::schema::{bool_str, parse_bool, KeyAccess, UnitFile, UnitSection};

/// Sections and keys dropped by [`unmarshal`] because they matched no
/// declared field and the target record has no sink for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ignored {
    pub sections: Vec<Section>,
    pub keys: Vec<IgnoredKey>,
}

/// A dropped key together with the section it appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredKey {
    pub section: String,
    pub key: Key,
}

impl Ignored {
    /// `true` when nothing was dropped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.keys.is_empty()
    }
}

/// Serializes a file record to canonical configuration text.
///
/// Field declaration order determines output order; unknown-sink contents
/// are appended last, preserving their stored order.
///
/// # Errors
///
/// Fails only if the in-memory writer fails, which it does not; the
/// `Result` exists for parity with [`encode`].
pub fn marshal<F: UnitFile>(file: &F) -> Result<Vec<u8>> {
    let document = to_document(file);
    let mut out = Vec::new();
    encode(&document, &mut out)?;
    Ok(out)
}

/// Builds the generic document for a file record without encoding it.
#[must_use]
pub fn to_document<F: UnitFile>(file: &F) -> Document {
    let mut document = Document::default();
    for binding in F::SECTIONS {
        binding.append(file, &mut document.sections);
    }
    if let Some(extra) = file.unknown_sections() {
        document.sections.extend(extra.iter().cloned());
    }
    document
}

/// Parses configuration text and stores the result in `file`.
///
/// Returns the [`Ignored`] report of sections and keys that matched no
/// declared field and found no sink.
///
/// # Errors
///
/// Propagates decode errors unchanged; `file` is left untouched in
/// that case.
pub fn unmarshal<F: UnitFile>(data: &[u8], file: &mut F) -> Result<Ignored> {
    let document = decode(data)?;
    Ok(apply_document(&document, file))
}

/// Distributes an already-decoded document over a file record.
pub fn apply_document<F: UnitFile>(document: &Document, file: &mut F) -> Ignored {
    let mut ignored = Ignored::default();

    let mut known = HashSet::new();
    for binding in F::SECTIONS {
        known.insert(binding.name());
        let sections = document.sections_by_name(binding.name());
        if sections.is_empty() {
            continue;
        }
        binding.assign(file, &sections, &mut ignored);
    }

    for section in &document.sections {
        if known.contains(section.name.as_str()) {
            continue;
        }
        match file.unknown_sections_mut() {
            Some(sink) => sink.push(section.clone()),
            None => ignored.sections.push(section.clone()),
        }
    }
    ignored
}

/// Marshals one section record into a generic [`Section`].
pub(crate) fn record_to_section<S: UnitSection>(name: &str, record: &S) -> Section {
    let mut section = Section {
        name: name.to_string(),
        comment: record.comment().to_string(),
        keys: Vec::new(),
    };

    for spec in S::KEYS {
        let comment = record
            .key_comments()
            .map(|c| c.get(spec.name).to_string())
            .unwrap_or_default();

        match spec.access {
            KeyAccess::Text(get, _) => {
                let value = get(record);
                if value.is_empty() && spec.omit_empty {
                    continue;
                }
                section.keys.push(Key {
                    name: spec.name.to_string(),
                    value: value.to_string(),
                    comment,
                });
            }

            KeyAccess::OptionalText(get, _) => {
                let Some(value) = get(record) else {
                    continue;
                };
                if value.is_empty() && spec.omit_empty {
                    continue;
                }
                section.keys.push(Key {
                    name: spec.name.to_string(),
                    value: value.to_string(),
                    comment,
                });
            }

            KeyAccess::Flag(get, _) => {
                let Some(value) = get(record) else {
                    continue;
                };
                section.keys.push(Key {
                    name: spec.name.to_string(),
                    value: bool_str(value).to_string(),
                    comment,
                });
            }

            KeyAccess::List(get, _) => {
                for (i, value) in get(record).iter().enumerate() {
                    // Empty entries are skipped; the comment rides on the
                    // first entry only.
                    if value.is_empty() {
                        continue;
                    }
                    section.keys.push(Key {
                        name: spec.name.to_string(),
                        value: value.clone(),
                        comment: if i == 0 { comment.clone() } else { String::new() },
                    });
                }
            }
        }
    }

    if let Some(extra) = record.unknown_keys() {
        section.keys.extend(extra.iter().cloned());
    }
    section
}

/// Unmarshals one generic [`Section`] into a fresh section record.
pub(crate) fn section_to_record<S: UnitSection>(
    section: &Section,
    ignored: &mut Ignored,
) -> S {
    let mut record = S::default();
    record.set_comment(section.comment.clone());

    let mut known = HashSet::new();
    for spec in S::KEYS {
        known.insert(spec.name);
        let keys = section.keys_by_name(spec.name);
        let Some(last) = keys.last() else {
            continue;
        };

        let mut comment = String::new();
        match spec.access {
            KeyAccess::Text(_, set) => {
                set(&mut record, last.value.clone());
                comment = last.comment.clone();
            }

            KeyAccess::OptionalText(_, set) => {
                set(&mut record, last.value.clone());
                comment = last.comment.clone();
            }

            KeyAccess::Flag(_, set) => {
                if let Some(value) = parse_bool(&last.value) {
                    set(&mut record, value);
                }
                comment = last.comment.clone();
            }

            KeyAccess::List(_, set) => {
                let mut values = Vec::with_capacity(keys.len());
                for key in &keys {
                    values.push(key.value.clone());
                    if !comment.is_empty() {
                        comment.push('\n');
                    }
                    comment.push_str(&key.comment);
                }
                set(&mut record, values);
            }
        }

        if let Some(comments) = record.key_comments_mut() {
            comments.set(spec.name, &comment);
        }
    }

    for key in &section.keys {
        if known.contains(key.name.as_str()) {
            continue;
        }
        match record.unknown_keys_mut() {
            Some(sink) => sink.push(key.clone()),
            None => ignored.keys.push(IgnoredKey {
                section: section.name.clone(),
                key: key.clone(),
            }),
        }
    }
    record
}

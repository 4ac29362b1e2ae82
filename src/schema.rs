//! Schema declarations for binding documents to record types.
//!
//! A record type opts into binding by describing its fields in static
//! descriptor tables: [`KeySpec`] entries map key fields of a section
//! record, and [`SectionBinding`] handles map section fields of a file
//! record. The tables are plain associated consts — no runtime type
//! inspection is involved; the binder in [`crate::bind`] walks them with
//! typed accessor functions.
//!
//! Capability methods ([`UnitSection::key_comments`],
//! [`UnitSection::unknown_keys`], [`UnitFile::unknown_sections`], the
//! section comment accessors) default to `None`/no-op; a record implements
//! the ones it wants, and the binder skips the rest.
//!
//! ## Declaring a section record
//!
//! ```rust
//! use systemd_unit::{KeySpec, UnitSection};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct RouteSection {
//!     gateway: String,
//!     destination: String,
//! }
//!
//! impl UnitSection for RouteSection {
//!     const KEYS: &'static [KeySpec<Self>] = &[
//!         KeySpec::text(
//!             "Gateway",
//!             |s: &RouteSection| s.gateway.as_str(),
//!             |s: &mut RouteSection, v| s.gateway = v,
//!         ),
//!         KeySpec::text(
//!             "Destination",
//!             |s: &RouteSection| s.destination.as_str(),
//!             |s: &mut RouteSection, v| s.destination = v,
//!         )
//!         .omit_empty(),
//!     ];
//! }
//! ```

use indexmap::IndexMap;

use crate::bind::{self, Ignored};
use crate::document::{Key, Section};

/// Descriptor for one key field of a section record.
///
/// `name` is the canonical key name in the file; `omit_empty` suppresses
/// the key on marshal when the field holds an empty value.
pub struct KeySpec<S> {
    pub name: &'static str,
    pub omit_empty: bool,
    pub access: KeyAccess<S>,
}

/// Typed accessors for the supported field kinds.
///
/// Each variant carries a getter used by marshal and a setter used by
/// unmarshal. Booleans travel as `yes`/`no` on the wire; unset optionals
/// produce no key at all.
pub enum KeyAccess<S> {
    /// A plain text field, one key.
    Text(fn(&S) -> &str, fn(&mut S, String)),
    /// An optional text field, zero or one key.
    OptionalText(fn(&S) -> Option<&str>, fn(&mut S, String)),
    /// An optional boolean field, zero or one key.
    Flag(fn(&S) -> Option<bool>, fn(&mut S, bool)),
    /// A list field, zero or more keys sharing the canonical name.
    List(fn(&S) -> &[String], fn(&mut S, Vec<String>)),
}

impl<S> KeySpec<S> {
    pub const fn text(
        name: &'static str,
        get: fn(&S) -> &str,
        set: fn(&mut S, String),
    ) -> Self {
        KeySpec {
            name,
            omit_empty: false,
            access: KeyAccess::Text(get, set),
        }
    }

    pub const fn optional(
        name: &'static str,
        get: fn(&S) -> Option<&str>,
        set: fn(&mut S, String),
    ) -> Self {
        KeySpec {
            name,
            omit_empty: false,
            access: KeyAccess::OptionalText(get, set),
        }
    }

    pub const fn flag(
        name: &'static str,
        get: fn(&S) -> Option<bool>,
        set: fn(&mut S, bool),
    ) -> Self {
        KeySpec {
            name,
            omit_empty: false,
            access: KeyAccess::Flag(get, set),
        }
    }

    pub const fn list(
        name: &'static str,
        get: fn(&S) -> &[String],
        set: fn(&mut S, Vec<String>),
    ) -> Self {
        KeySpec {
            name,
            omit_empty: false,
            access: KeyAccess::List(get, set),
        }
    }

    /// Marks the field as omitted on marshal when empty.
    #[must_use]
    pub const fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }
}

/// A record type describing one section of a configuration file.
pub trait UnitSection: Default + 'static {
    /// Key descriptors in declaration order. This order is the sole
    /// determinant of key output order on marshal.
    const KEYS: &'static [KeySpec<Self>];

    /// The section's own comment. Override both accessors to carry it.
    fn comment(&self) -> &str {
        ""
    }
    fn set_comment(&mut self, _comment: String) {}

    /// Per-key comment container, if the record carries one.
    fn key_comments(&self) -> Option<&KeyComments> {
        None
    }
    fn key_comments_mut(&mut self) -> Option<&mut KeyComments> {
        None
    }

    /// Sink for keys that match no declared field, if the record opts in.
    fn unknown_keys(&self) -> Option<&[Key]> {
        None
    }
    fn unknown_keys_mut(&mut self) -> Option<&mut Vec<Key>> {
        None
    }
}

/// A record type describing a whole configuration file.
pub trait UnitFile: Default + 'static {
    /// Section bindings in declaration order. This order is the sole
    /// determinant of section output order on marshal.
    const SECTIONS: &'static [&'static dyn SectionBinding<Self>];

    /// Sink for sections that match no declared field, if the record
    /// opts in.
    fn unknown_sections(&self) -> Option<&[Section]> {
        None
    }
    fn unknown_sections_mut(&mut self) -> Option<&mut Vec<Section>> {
        None
    }
}

/// One section field of a file record, type-erased over the nested
/// record type.
pub trait SectionBinding<F> {
    /// The canonical section name this field binds to.
    fn name(&self) -> &'static str;

    /// Appends this field's sections to `out` in field order.
    fn append(&self, file: &F, out: &mut Vec<Section>);

    /// Populates this field from every matching section, in document
    /// order. Unclaimed keys inside the sections are routed to the nested
    /// record's sink or to `ignored`.
    fn assign(&self, file: &mut F, sections: &[&Section], ignored: &mut Ignored);
}

/// Binds a required nested record: exactly one section on marshal, the
/// last matching section wins on unmarshal.
pub struct Single<F, S> {
    pub name: &'static str,
    pub get: fn(&F) -> &S,
    pub get_mut: fn(&mut F) -> &mut S,
}

impl<F, S: UnitSection> SectionBinding<F> for Single<F, S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn append(&self, file: &F, out: &mut Vec<Section>) {
        out.push(bind::record_to_section(self.name, (self.get)(file)));
    }

    fn assign(&self, file: &mut F, sections: &[&Section], ignored: &mut Ignored) {
        for section in sections {
            *(self.get_mut)(file) = bind::section_to_record(section, ignored);
        }
    }
}

/// Binds an optional nested record: zero or one section.
pub struct Optional<F, S> {
    pub name: &'static str,
    pub get: fn(&F) -> Option<&S>,
    pub set: fn(&mut F, S),
}

impl<F, S: UnitSection> SectionBinding<F> for Optional<F, S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn append(&self, file: &F, out: &mut Vec<Section>) {
        if let Some(record) = (self.get)(file) {
            out.push(bind::record_to_section(self.name, record));
        }
    }

    fn assign(&self, file: &mut F, sections: &[&Section], ignored: &mut Ignored) {
        for section in sections {
            (self.set)(file, bind::section_to_record(section, ignored));
        }
    }
}

/// Binds a list of nested records: one section per element, in order.
pub struct Multiple<F, S> {
    pub name: &'static str,
    pub get: fn(&F) -> &[S],
    pub push: fn(&mut F, S),
}

impl<F, S: UnitSection> SectionBinding<F> for Multiple<F, S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn append(&self, file: &F, out: &mut Vec<Section>) {
        for record in (self.get)(file) {
            out.push(bind::record_to_section(self.name, record));
        }
    }

    fn assign(&self, file: &mut F, sections: &[&Section], ignored: &mut Ignored) {
        for section in sections {
            (self.push)(file, bind::section_to_record(section, ignored));
        }
    }
}

/// Ordered container attaching comments to keys by name.
///
/// Records expose one through [`UnitSection::key_comments`] so the binder
/// can move key comments in and out without a dedicated field per key.
///
/// # Examples
///
/// ```rust
/// use systemd_unit::KeyComments;
///
/// let mut comments = KeyComments::new();
/// comments.set("Name", "matched by udev");
/// assert_eq!(comments.get("Name"), "matched by udev");
/// assert_eq!(comments.get("Driver"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyComments(IndexMap<String, String>);

impl KeyComments {
    #[must_use]
    pub fn new() -> Self {
        KeyComments(IndexMap::new())
    }

    /// The comment stored for `key`, or `""` when none is attached.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Attaches `comment` to `key`. An empty comment removes the entry,
    /// so round-trips never accumulate blank attachments.
    pub fn set(&mut self, key: &str, comment: &str) {
        if comment.is_empty() {
            self.0.shift_remove(key);
        } else {
            self.0.insert(key.to_string(), comment.to_string());
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.0.shift_remove(key);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses the systemd boolean lexicon.
///
/// Accepts `1`/`yes`/`true`/`on` and `0`/`no`/`false`/`off`; anything else
/// is `None`.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Renders a boolean the way systemd writes them.
#[must_use]
pub fn bool_str(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_comments_set_get_remove() {
        let mut comments = KeyComments::new();
        comments.set("Gateway", "default route");
        assert_eq!(comments.get("Gateway"), "default route");
        comments.set("Gateway", "");
        assert_eq!(comments.get("Gateway"), "");
        assert!(comments.is_empty());

        comments.set("A", "a");
        comments.remove("A");
        assert!(comments.is_empty());
    }

    #[test]
    fn test_parse_bool_lexicon() {
        for s in ["1", "yes", "true", "on"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "no", "false", "off"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool("Yes"), None);
    }

    #[test]
    fn test_bool_str() {
        assert_eq!(bool_str(true), "yes");
        assert_eq!(bool_str(false), "no");
    }
}

//! End-to-end schema binding tests: declared records to text and back,
//! including comment routing and unknown-field preservation.

use systemd_unit::{
    marshal, unmarshal, Key, KeyComments, KeySpec, Multiple, Optional, Section, SectionBinding,
    Single, UnitFile, UnitSection,
};

#[derive(Debug, Default, PartialEq)]
struct TestFile {
    match_section: Option<MatchRules>,
    network: NetworkSettings,
    routes: Vec<Route>,
    extra_sections: Vec<Section>,
}

impl UnitFile for TestFile {
    const SECTIONS: &'static [&'static dyn SectionBinding<Self>] = &[
        &Optional {
            name: "Match",
            get: |f: &TestFile| f.match_section.as_ref(),
            set: |f: &mut TestFile, s| f.match_section = Some(s),
        },
        &Single {
            name: "Network",
            get: |f: &TestFile| &f.network,
            get_mut: |f: &mut TestFile| &mut f.network,
        },
        &Multiple {
            name: "Route",
            get: |f: &TestFile| f.routes.as_slice(),
            push: |f: &mut TestFile, s| f.routes.push(s),
        },
    ];

    fn unknown_sections(&self) -> Option<&[Section]> {
        Some(&self.extra_sections)
    }
    fn unknown_sections_mut(&mut self) -> Option<&mut Vec<Section>> {
        Some(&mut self.extra_sections)
    }
}

#[derive(Debug, Default, PartialEq)]
struct MatchRules {
    comment: String,
    key_comments: KeyComments,
    name: String,
    extra_keys: Vec<Key>,
}

impl UnitSection for MatchRules {
    const KEYS: &'static [KeySpec<Self>] = &[KeySpec::text(
        "Name",
        |s: &MatchRules| s.name.as_str(),
        |s: &mut MatchRules, v| s.name = v,
    )
    .omit_empty()];

    fn comment(&self) -> &str {
        &self.comment
    }
    fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }
    fn key_comments(&self) -> Option<&KeyComments> {
        Some(&self.key_comments)
    }
    fn key_comments_mut(&mut self) -> Option<&mut KeyComments> {
        Some(&mut self.key_comments)
    }
    fn unknown_keys(&self) -> Option<&[Key]> {
        Some(&self.extra_keys)
    }
    fn unknown_keys_mut(&mut self) -> Option<&mut Vec<Key>> {
        Some(&mut self.extra_keys)
    }
}

#[derive(Debug, Default, PartialEq)]
struct NetworkSettings {
    addresses: Vec<String>,
}

impl UnitSection for NetworkSettings {
    const KEYS: &'static [KeySpec<Self>] = &[KeySpec::list(
        "Address",
        |s: &NetworkSettings| s.addresses.as_slice(),
        |s: &mut NetworkSettings, v| s.addresses = v,
    )];
}

#[derive(Debug, Default, PartialEq)]
struct Route {
    comment: String,
    key_comments: KeyComments,
    gateway: String,
    destination: String,
    source: Option<String>,
    enable: Option<bool>,
    /// Rendered even when empty: not flagged omit-if-empty.
    disable: String,
    extra_keys: Vec<Key>,
}

impl UnitSection for Route {
    const KEYS: &'static [KeySpec<Self>] = &[
        KeySpec::text(
            "Gateway",
            |s: &Route| s.gateway.as_str(),
            |s: &mut Route, v| s.gateway = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Destination",
            |s: &Route| s.destination.as_str(),
            |s: &mut Route, v| s.destination = v,
        )
        .omit_empty(),
        KeySpec::optional(
            "Source",
            |s: &Route| s.source.as_deref(),
            |s: &mut Route, v| s.source = Some(v),
        ),
        KeySpec::flag(
            "Enable",
            |s: &Route| s.enable,
            |s: &mut Route, v| s.enable = Some(v),
        ),
        KeySpec::text(
            "Disable",
            |s: &Route| s.disable.as_str(),
            |s: &mut Route, v| s.disable = v,
        ),
    ];

    fn comment(&self) -> &str {
        &self.comment
    }
    fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }
    fn key_comments(&self) -> Option<&KeyComments> {
        Some(&self.key_comments)
    }
    fn key_comments_mut(&mut self) -> Option<&mut KeyComments> {
        Some(&mut self.key_comments)
    }
    fn unknown_keys(&self) -> Option<&[Key]> {
        Some(&self.extra_keys)
    }
    fn unknown_keys_mut(&mut self) -> Option<&mut Vec<Key>> {
        Some(&mut self.extra_keys)
    }
}

/// Canonical fixture: what the encoder itself would lay out.
const FIXTURE: &str = "# this is a config file!
[Match]
# some comment
# more comment!
Name=eth*

[Network]
Address=10.10.10.2/24
Address=10.10.10.3/24

# a section comment!
[Route]
Gateway=10.10.10.1/24

# comment for dest key
Destination=10.10.20.1/24
Disable=

[Route]
Gateway=10.10.10.1/24
Disable=
UndefinedKey=something

[Whatever]
";

#[test]
fn test_unmarshal_populates_declared_fields() {
    let mut file = TestFile::default();
    let ignored = unmarshal(FIXTURE.as_bytes(), &mut file).unwrap();
    assert!(ignored.is_empty());

    let match_section = file.match_section.as_ref().unwrap();
    assert_eq!(match_section.comment, "this is a config file!");
    assert_eq!(match_section.name, "eth*");
    assert_eq!(
        match_section.key_comments.get("Name"),
        "some comment\nmore comment!"
    );
    assert!(match_section.extra_keys.is_empty());

    assert_eq!(
        file.network.addresses,
        vec!["10.10.10.2/24".to_string(), "10.10.10.3/24".to_string()]
    );

    assert_eq!(file.routes.len(), 2);
    assert_eq!(file.routes[0].comment, "a section comment!");
    assert_eq!(file.routes[0].gateway, "10.10.10.1/24");
    assert_eq!(file.routes[0].destination, "10.10.20.1/24");
    assert_eq!(
        file.routes[0].key_comments.get("Destination"),
        "comment for dest key"
    );
    assert_eq!(
        file.routes[1].extra_keys,
        vec![Key {
            name: "UndefinedKey".to_string(),
            value: "something".to_string(),
            comment: String::new(),
        }]
    );

    assert_eq!(
        file.extra_sections,
        vec![Section {
            name: "Whatever".to_string(),
            comment: String::new(),
            keys: vec![],
        }]
    );
}

#[test]
fn test_unmarshal_then_marshal_reproduces_bytes() {
    let mut file = TestFile::default();
    unmarshal(FIXTURE.as_bytes(), &mut file).unwrap();
    let out = String::from_utf8(marshal(&file).unwrap()).unwrap();
    assert_eq!(out, FIXTURE);
}

#[test]
fn test_marshal_built_record() {
    let mut match_section = MatchRules {
        name: "eth*".to_string(),
        ..Default::default()
    };
    match_section.comment = "this is a config file!".to_string();
    match_section
        .key_comments
        .set("Name", "some comment\nmore comment!");

    let file = TestFile {
        match_section: Some(match_section),
        network: NetworkSettings {
            addresses: vec!["10.10.10.2/24".to_string(), "10.10.10.3/24".to_string()],
        },
        routes: vec![
            Route {
                gateway: "10.10.10.1/24".to_string(),
                destination: "10.10.20.1/24".to_string(),
                enable: Some(true),
                ..Default::default()
            },
            Route {
                gateway: "10.10.10.1/24".to_string(),
                source: Some("something".to_string()),
                extra_keys: vec![Key {
                    name: "UndefinedKey".to_string(),
                    value: "something".to_string(),
                    comment: String::new(),
                }],
                ..Default::default()
            },
        ],
        extra_sections: vec![Section {
            name: "Whatever".to_string(),
            comment: String::new(),
            keys: vec![],
        }],
    };

    let out = String::from_utf8(marshal(&file).unwrap()).unwrap();
    assert_eq!(
        out,
        "# this is a config file!
[Match]
# some comment
# more comment!
Name=eth*

[Network]
Address=10.10.10.2/24
Address=10.10.10.3/24

[Route]
Gateway=10.10.10.1/24
Destination=10.10.20.1/24
Enable=yes
Disable=

[Route]
Gateway=10.10.10.1/24
Source=something
Disable=
UndefinedKey=something

[Whatever]
"
    );
}

#[test]
fn test_marshal_skips_empty_list_entries() {
    let file = TestFile {
        network: NetworkSettings {
            addresses: vec![
                String::new(),
                "10.0.0.1/24".to_string(),
                String::new(),
            ],
        },
        ..Default::default()
    };
    let out = String::from_utf8(marshal(&file).unwrap()).unwrap();
    assert_eq!(out, "[Network]\nAddress=10.0.0.1/24\n");
}

#[test]
fn test_list_key_comments_merge_on_unmarshal() {
    #[derive(Debug, Default, PartialEq)]
    struct Commented {
        key_comments: KeyComments,
        addresses: Vec<String>,
    }
    impl UnitSection for Commented {
        const KEYS: &'static [KeySpec<Self>] = &[KeySpec::list(
            "Address",
            |s: &Commented| s.addresses.as_slice(),
            |s: &mut Commented, v| s.addresses = v,
        )];
        fn key_comments(&self) -> Option<&KeyComments> {
            Some(&self.key_comments)
        }
        fn key_comments_mut(&mut self) -> Option<&mut KeyComments> {
            Some(&mut self.key_comments)
        }
    }
    #[derive(Debug, Default, PartialEq)]
    struct CommentedFile {
        network: Commented,
    }
    impl UnitFile for CommentedFile {
        const SECTIONS: &'static [&'static dyn SectionBinding<Self>] = &[&Single {
            name: "Network",
            get: |f: &CommentedFile| &f.network,
            get_mut: |f: &mut CommentedFile| &mut f.network,
        }];
    }

    let mut file = CommentedFile::default();
    unmarshal(
        b"[Network]\n# address 1\nAddress=10.1.10.9/24\n# address 2\nAddress=10.1.10.11/24\n",
        &mut file,
    )
    .unwrap();
    assert_eq!(
        file.network.key_comments.get("Address"),
        "address 1\naddress 2"
    );
}

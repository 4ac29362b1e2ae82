//! Record types for the systemd `.network` dialect.
//!
//! A [`Network`] file matches devices through its `[Match]` section and
//! configures them through `[Network]`, `[Address]` and `[Route]` sections.
//! The first (in lexical order) network file matching a device is applied,
//! all later files are ignored.
//!
//! The types here declare a representative subset of the dialect's keys —
//! enough for real files — and route everything undeclared through the
//! unknown sinks so no input is lost on a round trip.
//!
//! ## Examples
//!
//! ```rust
//! use systemd_unit::network::Network;
//! use systemd_unit::{marshal, unmarshal};
//!
//! let text = b"[Match]\nName=eth0\n\n[Network]\nDHCP=ipv4\n";
//! let mut network = Network::default();
//! unmarshal(text.as_slice(), &mut network).unwrap();
//! assert_eq!(marshal(&network).unwrap(), text);
//! ```

use crate::document::{Key, Section};
use crate::schema::{
    KeyComments, KeySpec, Multiple, Optional, SectionBinding, UnitFile, UnitSection,
};

/// A `.network` configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub match_rules: Option<MatchSection>,
    pub link: Option<LinkSection>,
    pub network: Option<NetworkSection>,
    pub addresses: Vec<AddressSection>,
    pub routes: Vec<RouteSection>,
    /// Sections that match no declared field, in original order.
    pub extra_sections: Vec<Section>,
}

impl UnitFile for Network {
    const SECTIONS: &'static [&'static dyn SectionBinding<Self>] = &[
        &Optional {
            name: "Match",
            get: |f: &Network| f.match_rules.as_ref(),
            set: |f: &mut Network, s| f.match_rules = Some(s),
        },
        &Optional {
            name: "Link",
            get: |f: &Network| f.link.as_ref(),
            set: |f: &mut Network, s| f.link = Some(s),
        },
        &Optional {
            name: "Network",
            get: |f: &Network| f.network.as_ref(),
            set: |f: &mut Network, s| f.network = Some(s),
        },
        &Multiple {
            name: "Address",
            get: |f: &Network| f.addresses.as_slice(),
            push: |f: &mut Network, s| f.addresses.push(s),
        },
        &Multiple {
            name: "Route",
            get: |f: &Network| f.routes.as_slice(),
            push: |f: &mut Network, s| f.routes.push(s),
        },
    ];

    fn unknown_sections(&self) -> Option<&[Section]> {
        Some(&self.extra_sections)
    }

    fn unknown_sections_mut(&mut self) -> Option<&mut Vec<Section>> {
        Some(&mut self.extra_sections)
    }
}

/// `[Match]` — decides whether the file applies to a given device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSection {
    pub comment: String,
    pub key_comments: KeyComments,
    /// Shell-style globs matched against the device name.
    pub name: String,
    /// Hardware addresses, whitespace-separated.
    pub mac_address: String,
    /// Globs matched against the driver bound to the device.
    pub driver: String,
    /// Globs matched against the udev device type.
    pub kind: String,
    /// Globs matched against the persistent device path.
    pub path: String,
    /// Hostname or machine ID condition.
    pub host: String,
    /// Virtualization environment condition.
    pub virtualization: String,
    pub extra_keys: Vec<Key>,
}

impl UnitSection for MatchSection {
    const KEYS: &'static [KeySpec<Self>] = &[
        KeySpec::text(
            "Name",
            |s: &MatchSection| s.name.as_str(),
            |s: &mut MatchSection, v| s.name = v,
        )
        .omit_empty(),
        KeySpec::text(
            "MACAddress",
            |s: &MatchSection| s.mac_address.as_str(),
            |s: &mut MatchSection, v| s.mac_address = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Driver",
            |s: &MatchSection| s.driver.as_str(),
            |s: &mut MatchSection, v| s.driver = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Type",
            |s: &MatchSection| s.kind.as_str(),
            |s: &mut MatchSection, v| s.kind = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Path",
            |s: &MatchSection| s.path.as_str(),
            |s: &mut MatchSection, v| s.path = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Host",
            |s: &MatchSection| s.host.as_str(),
            |s: &mut MatchSection, v| s.host = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Virtualization",
            |s: &MatchSection| s.virtualization.as_str(),
            |s: &mut MatchSection, v| s.virtualization = v,
        )
        .omit_empty(),
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

/// `[Link]` — link-level device settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkSection {
    pub comment: String,
    pub mac_address: String,
    /// MTU in bytes; the usual K/M/G suffixes are understood.
    pub mtu_bytes: String,
    pub arp: Option<bool>,
    pub multicast: Option<bool>,
    /// When `yes`, matching links are left entirely unconfigured.
    pub unmanaged: Option<bool>,
    pub required_for_online: String,
}

impl UnitSection for LinkSection {
    const KEYS: &'static [KeySpec<Self>] = &[
        KeySpec::text(
            "MACAddress",
            |s: &LinkSection| s.mac_address.as_str(),
            |s: &mut LinkSection, v| s.mac_address = v,
        )
        .omit_empty(),
        KeySpec::text(
            "MTUBytes",
            |s: &LinkSection| s.mtu_bytes.as_str(),
            |s: &mut LinkSection, v| s.mtu_bytes = v,
        )
        .omit_empty(),
        KeySpec::flag(
            "ARP",
            |s: &LinkSection| s.arp,
            |s: &mut LinkSection, v| s.arp = Some(v),
        ),
        KeySpec::flag(
            "Multicast",
            |s: &LinkSection| s.multicast,
            |s: &mut LinkSection, v| s.multicast = Some(v),
        ),
        KeySpec::flag(
            "Unmanaged",
            |s: &LinkSection| s.unmanaged,
            |s: &mut LinkSection, v| s.unmanaged = Some(v),
        ),
        KeySpec::text(
            "RequiredForOnline",
            |s: &LinkSection| s.required_for_online.as_str(),
            |s: &mut LinkSection, v| s.required_for_online = v,
        )
        .omit_empty(),
    ];

    fn comment(&self) -> &str {
        &self.comment
    }
    fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }
}

/// `[Network]` — how the matched device is configured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSection {
    pub comment: String,
    pub key_comments: KeyComments,
    /// Presentation-only description of the device.
    pub description: String,
    /// `yes`, `no`, `ipv4` or `ipv6`.
    pub dhcp: String,
    pub dhcp_server: Option<bool>,
    pub ipv6_accept_ra: Option<bool>,
    pub addresses: Vec<String>,
    pub gateway: String,
    pub dns: Vec<String>,
    pub domains: Vec<String>,
}

impl UnitSection for NetworkSection {
    const KEYS: &'static [KeySpec<Self>] = &[
        KeySpec::text(
            "Description",
            |s: &NetworkSection| s.description.as_str(),
            |s: &mut NetworkSection, v| s.description = v,
        )
        .omit_empty(),
        KeySpec::text(
            "DHCP",
            |s: &NetworkSection| s.dhcp.as_str(),
            |s: &mut NetworkSection, v| s.dhcp = v,
        )
        .omit_empty(),
        KeySpec::flag(
            "DHCPServer",
            |s: &NetworkSection| s.dhcp_server,
            |s: &mut NetworkSection, v| s.dhcp_server = Some(v),
        ),
        KeySpec::flag(
            "IPv6AcceptRA",
            |s: &NetworkSection| s.ipv6_accept_ra,
            |s: &mut NetworkSection, v| s.ipv6_accept_ra = Some(v),
        ),
        KeySpec::list(
            "Address",
            |s: &NetworkSection| s.addresses.as_slice(),
            |s: &mut NetworkSection, v| s.addresses = v,
        ),
        KeySpec::text(
            "Gateway",
            |s: &NetworkSection| s.gateway.as_str(),
            |s: &mut NetworkSection, v| s.gateway = v,
        )
        .omit_empty(),
        KeySpec::list(
            "DNS",
            |s: &NetworkSection| s.dns.as_slice(),
            |s: &mut NetworkSection, v| s.dns = v,
        ),
        KeySpec::list(
            "Domains",
            |s: &NetworkSection| s.domains.as_slice(),
            |s: &mut NetworkSection, v| s.domains = v,
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
}

/// `[Address]` — one static address; repeat the section for several.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressSection {
    pub comment: String,
    pub address: String,
    pub peer: String,
    pub broadcast: String,
    pub label: String,
    pub scope: String,
}

impl UnitSection for AddressSection {
    const KEYS: &'static [KeySpec<Self>] = &[
        KeySpec::text(
            "Address",
            |s: &AddressSection| s.address.as_str(),
            |s: &mut AddressSection, v| s.address = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Peer",
            |s: &AddressSection| s.peer.as_str(),
            |s: &mut AddressSection, v| s.peer = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Broadcast",
            |s: &AddressSection| s.broadcast.as_str(),
            |s: &mut AddressSection, v| s.broadcast = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Label",
            |s: &AddressSection| s.label.as_str(),
            |s: &mut AddressSection, v| s.label = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Scope",
            |s: &AddressSection| s.scope.as_str(),
            |s: &mut AddressSection, v| s.scope = v,
        )
        .omit_empty(),
    ];

    fn comment(&self) -> &str {
        &self.comment
    }
    fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }
}

/// `[Route]` — one route; repeat the section for several.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSection {
    pub comment: String,
    pub key_comments: KeyComments,
    pub gateway: String,
    pub destination: String,
    /// Source prefix of the route, unset when not constrained.
    pub source: Option<String>,
    pub metric: String,
    pub gateway_on_link: Option<bool>,
    pub extra_keys: Vec<Key>,
}

impl UnitSection for RouteSection {
    const KEYS: &'static [KeySpec<Self>] = &[
        KeySpec::text(
            "Gateway",
            |s: &RouteSection| s.gateway.as_str(),
            |s: &mut RouteSection, v| s.gateway = v,
        )
        .omit_empty(),
        KeySpec::text(
            "Destination",
            |s: &RouteSection| s.destination.as_str(),
            |s: &mut RouteSection, v| s.destination = v,
        )
        .omit_empty(),
        KeySpec::optional(
            "Source",
            |s: &RouteSection| s.source.as_deref(),
            |s: &mut RouteSection, v| s.source = Some(v),
        ),
        KeySpec::text(
            "Metric",
            |s: &RouteSection| s.metric.as_str(),
            |s: &mut RouteSection, v| s.metric = v,
        )
        .omit_empty(),
        KeySpec::flag(
            "GatewayOnLink",
            |s: &RouteSection| s.gateway_on_link,
            |s: &mut RouteSection, v| s.gateway_on_link = Some(v),
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

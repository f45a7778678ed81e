use std::{
    net::IpAddr,
    str::FromStr,
    sync::LazyLock,
};

use cidr::IpCidr;

use crate::ip_util::parse_network;

pub const IPV4_INTERNAL_RANGES: &[&str] = &[
    "0.0.0.0/8",       // Current network (only valid as source address)
    "10.0.0.0/8",      // Private network
    "100.64.0.0/10",   // Shared address space
    "127.0.0.0/8",     // Loopback
    "169.254.0.0/16",  // Link-local, also cloud metadata endpoints
    "172.16.0.0/12",   // Private network
    "192.0.0.0/24",    // IETF protocol assignments
    "192.0.2.0/24",    // TEST-NET-1
    "192.88.99.0/24",  // IPv6 to IPv4 relay
    "192.168.0.0/16",  // Private network
    "198.18.0.0/15",   // Benchmarking
    "198.51.100.0/24", // TEST-NET-2
    "203.0.113.0/24",  // TEST-NET-3
    "224.0.0.0/4",     // Multicast
    "240.0.0.0/4",     // Reserved
];

pub const IPV6_INTERNAL_RANGES: &[&str] = &[
    "::1/128",       // Loopback
    "64:ff9b::/96",  // IPv4/IPv6 translation (RFC 6052)
    "100::/64",      // Discard prefix (RFC 6666)
    "2001::/32",     // Teredo
    "2001:10::/28",  // Deprecated ORCHID
    "2001:20::/28",  // ORCHIDv2
    "2001:db8::/32", // Documentation
    "2002::/16",     // 6to4
    "fc00::/7",      // Unique local address
    "fe80::/10",     // Link-local
    "ff00::/8",      // Multicast
];

static INTERNAL: LazyLock<IpClassifier> = LazyLock::new(|| {
    let ipv4 = RangeCatalogue::parse(IPV4_INTERNAL_RANGES).expect("malformed built-in IPv4 range");
    let ipv6 = RangeCatalogue::parse(IPV6_INTERNAL_RANGES).expect("malformed built-in IPv6 range");
    log::trace!("loaded {} IPv4 and {} IPv6 internal ranges", ipv4.len(), ipv6.len());
    IpClassifier::new(ipv4, ipv6)
});

/// An ordered, immutable list of networks for one address family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeCatalogue {
    ranges: Vec<IpCidr>,
}

impl RangeCatalogue {
    /// Parses every literal, failing on the first one that is not `addr/len`.
    pub fn parse(literals: &[&str]) -> std::io::Result<Self> {
        let mut ranges = Vec::with_capacity(literals.len());
        for literal in literals {
            match parse_network(literal) {
                Some(range) => ranges.push(range),
                None => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("failed to convert {} to CIDR", literal),
                    ));
                }
            }
        }
        Ok(Self { ranges })
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.ranges.iter().any(|range| range.contains(ip))
    }

    pub fn ranges(&self) -> &[IpCidr] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Decides whether an address belongs to an internal/reserved block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpClassifier {
    ipv4: RangeCatalogue,
    ipv6: RangeCatalogue,
}

impl IpClassifier {
    pub fn new(ipv4: RangeCatalogue, ipv6: RangeCatalogue) -> Self {
        Self { ipv4, ipv6 }
    }

    /// The built-in catalogue, parsed on first use. Panics if a compiled-in literal is malformed.
    pub fn internal() -> &'static IpClassifier {
        &INTERNAL
    }

    pub fn ipv4(&self) -> &RangeCatalogue {
        &self.ipv4
    }

    pub fn ipv6(&self) -> &RangeCatalogue {
        &self.ipv6
    }

    /// Returns false for anything that is not an IP literal.
    pub fn is_internal(&self, s: &str) -> bool {
        match IpAddr::from_str(s) {
            Ok(ip) => self.is_internal_ip(ip),
            Err(_) => false,
        }
    }

    /// IPv4-mapped IPv6 addresses are tested as the IPv4 address they carry.
    pub fn is_internal_ip(&self, ip: IpAddr) -> bool {
        let ip = ip.to_canonical();
        self.ipv4.contains(&ip) || self.ipv6.contains(&ip)
    }
}

/// Checks `s` against the built-in internal ranges.
pub fn is_internal(s: &str) -> bool {
    IpClassifier::internal().is_internal(s)
}

/// True if `s` is a substring of any built-in IPv4 range literal.
pub fn is_in_ipv4_list(s: &str) -> bool {
    IPV4_INTERNAL_RANGES.iter().any(|range| range.contains(s))
}

/// True if `s` is a substring of any built-in IPv6 range literal.
pub fn is_in_ipv6_list(s: &str) -> bool {
    IPV6_INTERNAL_RANGES.iter().any(|range| range.contains(s))
}

use std::{
    borrow::Cow,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use cidr::{IpCidr, IpInet};

/// Anything that can be checked by [`is_ipv4`] / [`is_ipv6`]: a textual literal or an already parsed address.
///
/// Both the parsed value and the textual form take part in the family checks, so parsed
/// addresses are rendered back to text before the separator test. An IPv4-mapped IPv6 address
/// renders in its IPv4 form, so once parsed it only counts as IPv4.
pub trait IpCandidate {
    fn parsed(&self) -> Option<IpAddr>;
    fn text(&self) -> Cow<'_, str>;
}

impl IpCandidate for str {
    fn parsed(&self) -> Option<IpAddr> {
        IpAddr::from_str(self).ok()
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl IpCandidate for String {
    fn parsed(&self) -> Option<IpAddr> {
        self.as_str().parsed()
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl IpCandidate for IpAddr {
    fn parsed(&self) -> Option<IpAddr> {
        Some(*self)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_canonical().to_string())
    }
}

impl IpCandidate for Ipv4Addr {
    fn parsed(&self) -> Option<IpAddr> {
        Some(IpAddr::V4(*self))
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl IpCandidate for Ipv6Addr {
    fn parsed(&self) -> Option<IpAddr> {
        Some(IpAddr::V6(*self))
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_canonical().to_string())
    }
}

impl<T: IpCandidate + ?Sized> IpCandidate for &T {
    fn parsed(&self) -> Option<IpAddr> {
        (**self).parsed()
    }

    fn text(&self) -> Cow<'_, str> {
        (**self).text()
    }
}

/// Checks if a string is either an IPv4 or an IPv6 address.
pub fn is_ip(s: &str) -> bool {
    IpAddr::from_str(s).is_ok()
}

/// Checks if a string is a valid port number (1-65535).
pub fn is_port(s: &str) -> bool {
    matches!(s.parse::<i64>(), Ok(port) if port > 0 && port < 65536)
}

/// True when every candidate is an IPv4 address.
///
/// A candidate qualifies when it reduces to a 4-byte address *and* its text contains a `.`.
/// IPv4-mapped IPv6 literals written in dotted form (`::ffff:1.2.3.4`) therefore pass both
/// this check and [`is_ipv6`], while the same address already parsed only passes this one.
///
/// Note: an empty slice returns `true`. Callers validating argument lists must check for
/// emptiness themselves.
pub fn is_ipv4<T: IpCandidate>(ips: &[T]) -> bool {
    ips.iter().all(|candidate| match candidate.parsed() {
        Some(ip) => ip.to_canonical().is_ipv4() && candidate.text().contains('.'),
        None => false,
    })
}

/// True when every candidate is an IPv6 address: it parses and its text contains a `:`.
///
/// Note: an empty slice returns `true`, see [`is_ipv4`].
pub fn is_ipv6<T: IpCandidate>(ips: &[T]) -> bool {
    ips.iter()
        .all(|candidate| candidate.parsed().is_some() && candidate.text().contains(':'))
}

// Host bits are allowed in the input and masked off in the result.
pub(crate) fn parse_network(s: &str) -> Option<IpCidr> {
    if !s.contains('/') {
        return None;
    }
    IpInet::from_str(s).ok().map(|inet| inet.network())
}

pub(crate) fn cidr_string(network: &IpCidr) -> String {
    format!("{}/{}", network.first_address(), network.network_length())
}

/// Checks if the string is a valid CIDR notation (IPv4 or IPv6).
pub fn is_cidr(s: &str) -> bool {
    parse_network(s).is_some()
}

/// Same as [`is_cidr`] after replacing every `-` with `/`, e.g. `10.0.0.0-8`.
pub fn is_cidr_with_expansion(s: &str) -> bool {
    is_cidr(&s.replace('-', "/"))
}

/// Converts an address or CIDR string to a network.
///
/// A bare address becomes a single-host network (`/32` or `/128`). The result is rendered and
/// parsed a second time so that every accepted spelling lands on the same canonical network.
pub fn to_cidr(item: &str) -> Option<IpCidr> {
    let item = if is_ipv4(&[item]) {
        format!("{}/32", item)
    } else if is_ipv6(&[item]) {
        format!("{}/128", item)
    } else {
        item.to_string()
    };

    let network = parse_network(&item)?;
    parse_network(&cidr_string(&network))
}

/// Converts an IPv4 address or CIDR to a network; a bare address becomes `/32`.
pub fn as_ipv4_ipnet(ipv4: &str) -> Option<IpCidr> {
    if is_ipv4(&[ipv4]) {
        return parse_network(&format!("{}/32", ipv4));
    }
    parse_network(ipv4)
}

/// Converts an IPv6 address or CIDR to a network.
///
/// A bare address becomes a `/64`, unlike [`to_cidr`] which treats it as a `/128` host.
pub fn as_ipv6_ipnet(ipv6: &str) -> Option<IpCidr> {
    if is_ipv6(&[ipv6]) {
        return parse_network(&format!("{}/64", ipv6));
    }
    parse_network(ipv6)
}

/// Appends `/32` to any IP literal; other input is returned unchanged.
pub fn as_ipv4_cidr(ipv4: &str) -> String {
    if is_ip(ipv4) {
        return format!("{}/32", ipv4);
    }
    ipv4.to_string()
}

/// Appends `/128` to an IPv6 literal; other input is returned unchanged.
pub fn as_ipv6_cidr(ipv6: &str) -> String {
    if is_ipv6(&[ipv6]) {
        return format!("{}/128", ipv6);
    }
    ipv6.to_string()
}

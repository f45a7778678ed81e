mod error;
pub mod file_util;
pub mod ip_range;
pub mod ip_util;
mod linux;
mod macos;
pub mod net_util;
pub mod permission;
mod probe_args;
pub mod slice_util;
pub mod strings_util;
mod windows;

use std::net::{Ipv4Addr, Ipv6Addr};

pub use {
    error::{BindError, Error},
    ip_range::{IpClassifier, RangeCatalogue, is_internal},
    ip_util::{as_ipv4_ipnet, as_ipv6_ipnet, is_cidr, is_ip, is_ipv4, is_ipv6, to_cidr},
    net_util::{OutboundIps, get_bindable_address, get_interface_by_ip, get_outbound_ips, get_source_ip},
    probe_args::ProbeArgs,
};

pub use cidr::IpCidr;
pub use pnet::datalink::NetworkInterface;

/// scanme.sh, used as the default IPv4 routing probe.
pub const PROBE_IPV4: Ipv4Addr = Ipv4Addr::new(128, 199, 158, 128);
/// scanme.sh, used as the default IPv6 routing probe.
pub const PROBE_IPV6: Ipv6Addr = Ipv6Addr::new(0x2400, 0x6180, 0, 0xd0, 0, 0, 0x91, 0x1001);
/// UDP port used when looking up source addresses. Nothing is sent to it.
pub const PROBE_PORT: u16 = 12345;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::{PROBE_IPV4, PROBE_IPV6, PROBE_PORT};

/// Targets used to discover the default outbound addresses of this host.
///
/// No packet is ever sent to them; they only need to be routable.
#[derive(Debug, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProbeArgs {
    pub probe_ipv4: IpAddr,
    pub probe_ipv6: IpAddr,
    pub probe_port: u16,
}

impl Default for ProbeArgs {
    fn default() -> Self {
        Self {
            probe_ipv4: IpAddr::V4(PROBE_IPV4),
            probe_ipv6: IpAddr::V6(PROBE_IPV6),
            probe_port: PROBE_PORT,
        }
    }
}

impl ProbeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe_ipv4(mut self, probe_ipv4: Ipv4Addr) -> Self {
        self.probe_ipv4 = IpAddr::V4(probe_ipv4);
        self
    }

    pub fn probe_ipv6(mut self, probe_ipv6: Ipv6Addr) -> Self {
        self.probe_ipv6 = IpAddr::V6(probe_ipv6);
        self
    }

    pub fn probe_port(mut self, probe_port: u16) -> Self {
        self.probe_port = probe_port;
        self
    }
}

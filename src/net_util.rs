use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, ToSocketAddrs, UdpSocket};

use pnet::datalink::NetworkInterface;

use crate::{BindError, Error, PROBE_PORT, ProbeArgs, ip_util::is_ipv4, ip_util::is_ipv6};

/// Default outbound addresses of this host. The IPv6 leg may fail on its own.
#[derive(Debug)]
pub struct OutboundIps {
    pub ipv4: IpAddr,
    pub ipv6: std::io::Result<IpAddr>,
}

/// Gets the local address the OS would use to reach `target`.
///
/// This connects a UDP socket, which only consults the routing table: no packet is sent.
pub fn get_source_ip(target: &str) -> std::io::Result<IpAddr> {
    source_ip_via(target, PROBE_PORT)
}

fn source_ip_via(target: &str, port: u16) -> std::io::Result<IpAddr> {
    let remote = (target, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| Error::NoSourceIp(target.to_string()))?;

    let bind_addr = if remote.is_ipv4() {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
    } else {
        SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
    };
    let socket = UdpSocket::bind(bind_addr)?;
    socket.connect(remote)?;

    let source = socket.local_addr()?.ip();
    if source.is_unspecified() {
        return Err(Error::NoSourceIp(target.to_string()).into());
    }
    log::debug!("source ip for {} is {}", remote, source);
    Ok(source)
}

/// Collects the default outbound IPv4 and IPv6 addresses using the default probe targets.
pub fn get_outbound_ips() -> std::io::Result<OutboundIps> {
    get_outbound_ips_with(&ProbeArgs::default())
}

/// Fails only when the IPv4 leg fails; an IPv6 failure is reported in [`OutboundIps::ipv6`].
pub fn get_outbound_ips_with(args: &ProbeArgs) -> std::io::Result<OutboundIps> {
    let ipv4 = source_ip_via(&args.probe_ipv4.to_string(), args.probe_port);
    let ipv6 = source_ip_via(&args.probe_ipv6.to_string(), args.probe_port);
    combine_outbound(ipv4, ipv6)
}

fn combine_outbound(ipv4: std::io::Result<IpAddr>, ipv6: std::io::Result<IpAddr>) -> std::io::Result<OutboundIps> {
    let ipv4 =
        ipv4.map_err(|e| std::io::Error::new(e.kind(), format!("couldn't determine ipv4 routing interface: {}", e)))?;

    let ipv6 = ipv6.map_err(|e| {
        log::debug!("ipv6 routing lookup failed: {}", e);
        std::io::Error::new(e.kind(), format!("couldn't determine ipv6 routing interface: {}", e))
    });

    Ok(OutboundIps { ipv4, ipv6 })
}

/// Finds the local interface that has `ip` bound to it.
pub fn get_interface_by_ip(ip: IpAddr) -> std::io::Result<NetworkInterface> {
    let interfaces = pnet::datalink::interfaces();
    log::trace!("scanning {} interfaces for {}", interfaces.len(), ip);
    find_interface_by_ip(&interfaces, ip)
        .cloned()
        .ok_or_else(|| Error::InterfaceNotFound(ip).into())
}

/// The address must be equal and both sides must agree on the family, since some platforms
/// report IPv4 addresses in their IPv6-mapped form.
pub fn find_interface_by_ip(interfaces: &[NetworkInterface], ip: IpAddr) -> Option<&NetworkInterface> {
    interfaces.iter().find(|interface| {
        interface.ips.iter().any(|network| {
            let address = network.ip();
            address.to_canonical() == ip.to_canonical() && (is_ipv4(&[ip, address]) || is_ipv6(&[ip, address]))
        })
    })
}

/// Returns the first candidate on which both a TCP and a UDP socket can be bound to `port`.
///
/// Candidates are IP literals or host names; a host name binds on its first resolved address.
/// Blank candidates are skipped. When nothing binds, every failure is reported.
pub fn get_bindable_address(port: u16, ips: &[&str]) -> Result<String, BindError> {
    let mut errs = BindError::default();
    for ip in ips.iter().filter(|ip| !ip.is_empty()) {
        match try_bind(ip, port) {
            Ok(()) => return Ok(ip.to_string()),
            Err(err) => {
                log::debug!("cannot bind {}:{}: {}", ip, port, err);
                errs.failures.push((ip.to_string(), err));
            }
        }
    }
    Err(errs)
}

fn try_bind(host: &str, port: u16) -> std::io::Result<()> {
    let addr = (host, port).to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("no address for {}", host))
    })?;
    drop(TcpListener::bind(addr)?);
    drop(UdpSocket::bind(addr)?);
    Ok(())
}

/// Asks the OS for a currently unused TCP port on loopback.
pub fn get_free_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::datalink::MacAddr;
    use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

    fn ni(name: &str, index: u32, ips: &[IpNetwork]) -> NetworkInterface {
        NetworkInterface {
            name: name.into(),
            description: "".into(),
            index,
            mac: Some(MacAddr::new(0x02, 0, 0, 0, 0, index as u8)),
            ips: ips.to_vec(),
            flags: 0,
        }
    }

    fn v4(s: &str, p: u8) -> IpNetwork {
        IpNetwork::V4(Ipv4Network::new(s.parse().unwrap(), p).unwrap())
    }

    fn v6(s: &str, p: u8) -> IpNetwork {
        IpNetwork::V6(Ipv6Network::new(s.parse().unwrap(), p).unwrap())
    }

    fn interfaces() -> Vec<NetworkInterface> {
        vec![
            ni("lo", 1, &[v4("127.0.0.1", 8), v6("::1", 128)]),
            ni("eth0", 2, &[v4("192.168.1.5", 24), v6("fe80::1", 64)]),
            ni("wg0", 3, &[v6("::ffff:10.8.0.2", 128)]),
        ]
    }

    #[test]
    fn test_find_interface_by_ip() {
        let interfaces = interfaces();
        let found = find_interface_by_ip(&interfaces, "192.168.1.5".parse().unwrap()).unwrap();
        assert_eq!(found.name, "eth0");
        let found = find_interface_by_ip(&interfaces, "::1".parse().unwrap()).unwrap();
        assert_eq!(found.name, "lo");
        assert!(find_interface_by_ip(&interfaces, "192.168.1.6".parse().unwrap()).is_none());
    }

    #[test]
    fn test_find_interface_with_mapped_binding() {
        let interfaces = interfaces();
        let found = find_interface_by_ip(&interfaces, "10.8.0.2".parse().unwrap()).unwrap();
        assert_eq!(found.name, "wg0");
    }

    #[test]
    fn test_get_interface_by_ip_not_found() {
        let err = get_interface_by_ip("203.0.113.254".parse().unwrap()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_get_source_ip_loopback() {
        let source = get_source_ip("127.0.0.1").unwrap();
        assert!(source.is_loopback());
    }

    #[test]
    fn test_get_source_ip_bad_target() {
        assert!(get_source_ip("definitely not a host").is_err());
    }

    #[test]
    fn test_outbound_ips_via_loopback() {
        let args = ProbeArgs::new().probe_ipv4(Ipv4Addr::LOCALHOST).probe_ipv6(Ipv6Addr::LOCALHOST);
        let outbound = get_outbound_ips_with(&args).unwrap();
        assert_eq!(outbound.ipv4, IpAddr::V4(Ipv4Addr::LOCALHOST));
        println!("ipv6 leg: {:?}", outbound.ipv6);
    }

    #[test]
    fn test_outbound_keeps_ipv4_when_ipv6_fails() {
        let ipv4 = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 5));
        let unreachable = std::io::Error::new(std::io::ErrorKind::NetworkUnreachable, "network is unreachable");
        let outbound = combine_outbound(Ok(ipv4), Err(unreachable)).unwrap();
        assert_eq!(outbound.ipv4, ipv4);
        let err = outbound.ipv6.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NetworkUnreachable);
        assert!(err.to_string().starts_with("couldn't determine ipv6 routing interface"));
        assert!(err.to_string().ends_with("network is unreachable"));
    }

    #[test]
    fn test_outbound_fails_when_ipv4_fails() {
        let unreachable = std::io::Error::new(std::io::ErrorKind::NetworkUnreachable, "network is unreachable");
        let ipv6 = IpAddr::V6(Ipv6Addr::LOCALHOST);
        let err = combine_outbound(Err(unreachable), Ok(ipv6)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NetworkUnreachable);
        assert!(err.to_string().starts_with("couldn't determine ipv4 routing interface"));
    }

    #[test]
    fn test_bindable_address_skips_blank() {
        let err = get_bindable_address(0, &[""]).unwrap_err();
        assert!(err.failures.is_empty());
    }

    #[test]
    fn test_bindable_address_first_usable() {
        let ip = get_bindable_address(0, &["", "bogus.invalid", "127.0.0.1"]).unwrap();
        assert_eq!(ip, "127.0.0.1");
    }

    #[test]
    fn test_bindable_address_resolves_host_names() {
        let host = get_bindable_address(0, &["localhost"]).unwrap();
        assert_eq!(host, "localhost");
    }

    #[test]
    fn test_bindable_address_accumulates_failures() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();
        let err = get_bindable_address(port, &["127.0.0.1", "bogus.invalid"]).unwrap_err();
        assert_eq!(err.failures.len(), 2);
        assert_eq!(err.failures[0].0, "127.0.0.1");
        assert_eq!(err.failures[0].1.kind(), std::io::ErrorKind::AddrInUse);
        assert_eq!(err.failures[1].0, "bogus.invalid");
    }

    #[test]
    fn test_get_free_port() {
        let port = get_free_port().unwrap();
        assert_ne!(port, 0);
    }
}

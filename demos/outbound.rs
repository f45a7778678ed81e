use utilkit::{get_interface_by_ip, get_outbound_ips, get_source_ip, is_internal};

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    let source = get_source_ip("8.8.8.8")?;
    println!("source ip towards 8.8.8.8: {} (internal: {})", source, is_internal(&source.to_string()));

    let outbound = get_outbound_ips()?;
    match &outbound.ipv6 {
        Ok(ipv6) => println!("outbound ipv4: {}, ipv6: {}", outbound.ipv4, ipv6),
        Err(err) => println!("outbound ipv4: {}, ipv6 unavailable: {}", outbound.ipv4, err),
    }

    let interface = get_interface_by_ip(outbound.ipv4)?;
    println!("name:  {}", interface.name);
    println!("index: {}", interface.index);
    println!("mac:   {}", interface.mac.map(|mac| mac.to_string()).unwrap_or_else(|| "-".into()));
    println!("flags: {:#x}", interface.flags);
    for network in &interface.ips {
        println!("addr:  {}", network);
    }
    Ok(())
}

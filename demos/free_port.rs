use std::net::ToSocketAddrs;

use utilkit::{net_util::get_free_port, permission};

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    println!("free port: {}", get_free_port()?);
    println!("root: {}, cap_net_raw: {}", permission::is_root(), permission::has_cap_net_raw());

    let domain = std::env::args().nth(1).unwrap_or_else(|| "scanme.sh".into());
    for addr in (domain.as_str(), 0).to_socket_addrs()? {
        println!("{} -> {}", domain, addr.ip());
    }
    Ok(())
}

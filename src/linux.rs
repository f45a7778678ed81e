#![cfg(target_os = "linux")]

use std::path::Path;

const PROC_SELF_STATUS: &str = "/proc/self/status";
const CAP_NET_RAW: u32 = 13;

pub(crate) fn check_current_user_root() -> std::io::Result<bool> {
    Ok(nix::unistd::geteuid().is_root())
}

pub(crate) fn check_current_user_cap_net_raw() -> std::io::Result<bool> {
    let status = std::fs::read_to_string(PROC_SELF_STATUS)?;
    effective_capability(&status, CAP_NET_RAW)
}

// Reads the `CapEff:` bitmask out of a /proc/<pid>/status document.
fn effective_capability(status: &str, bit: u32) -> std::io::Result<bool> {
    let mask = status
        .lines()
        .find_map(|line| line.strip_prefix("CapEff:"))
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "no CapEff entry in process status"))?;
    let mask = u64::from_str_radix(mask.trim(), 16).map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Error parsing CapEff \"{}\": {}", mask.trim(), err),
        )
    })?;
    Ok(mask & (1 << bit) != 0)
}

pub(crate) fn chown(path: &Path, username: &str) -> std::io::Result<()> {
    let user = nix::unistd::User::from_name(username)?
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, format!("unknown user {}", username)))?;
    nix::unistd::chown(path, Some(user.uid), Some(user.gid))?;
    log::debug!("changed owner of {} to {}", path.display(), username);
    Ok(())
}

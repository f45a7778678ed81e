#![cfg(target_os = "macos")]

pub(crate) fn check_current_user_root() -> std::io::Result<bool> {
    Ok(nix::unistd::geteuid().is_root())
}

// There is no capability model to query.
pub(crate) fn check_current_user_cap_net_raw() -> std::io::Result<bool> {
    Err(crate::Error::Unsupported.into())
}

#![cfg(target_os = "windows")]

pub(crate) fn check_current_user_root() -> std::io::Result<bool> {
    Err(crate::Error::Unsupported.into())
}

pub(crate) fn check_current_user_cap_net_raw() -> std::io::Result<bool> {
    Err(crate::Error::Unsupported.into())
}

use std::sync::LazyLock;

#[cfg(target_os = "linux")]
use crate::linux::{check_current_user_cap_net_raw, check_current_user_root};

#[cfg(target_os = "macos")]
use crate::macos::{check_current_user_cap_net_raw, check_current_user_root};

#[cfg(target_os = "windows")]
use crate::windows::{check_current_user_cap_net_raw, check_current_user_root};

static IS_ROOT: LazyLock<bool> = LazyLock::new(|| resolve_flag("root", check_current_user_root()));

static HAS_CAP_NET_RAW: LazyLock<bool> = LazyLock::new(|| resolve_flag("CAP_NET_RAW", check_current_user_cap_net_raw()));

fn resolve_flag(name: &str, checked: std::io::Result<bool>) -> bool {
    match checked {
        Ok(value) => {
            log::debug!("{} permission: {}", name, value);
            value
        }
        Err(err) => {
            log::debug!("{} permission check unavailable: {}", name, err);
            false
        }
    }
}

/// Whether the process runs with an effective uid of 0. Computed once.
pub fn is_root() -> bool {
    *IS_ROOT
}

/// Whether the process may open raw sockets without being root. Computed once; always false
/// where the check is not implemented.
pub fn has_cap_net_raw() -> bool {
    *HAS_CAP_NET_RAW
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn check_current_user_root() -> std::io::Result<bool> {
    Err(crate::Error::Unsupported.into())
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn check_current_user_cap_net_raw() -> std::io::Result<bool> {
    Err(crate::Error::Unsupported.into())
}

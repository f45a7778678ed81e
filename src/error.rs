use std::net::IpAddr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{needle} not found in {haystack}")]
    NotFound { needle: String, haystack: String },

    #[error("{haystack} is not long enough to contain {needle}")]
    TooShort { needle: String, haystack: String },

    #[error("interface not found for {0}")]
    InterfaceNotFound(IpAddr),

    #[error("could not get source ip for {0}")]
    NoSourceIp(String),

    #[error("operation not supported on this platform")]
    Unsupported,
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::NotFound { .. } | Error::InterfaceNotFound(_) => std::io::ErrorKind::NotFound,
            Error::TooShort { .. } => std::io::ErrorKind::InvalidInput,
            Error::NoSourceIp(_) => std::io::ErrorKind::AddrNotAvailable,
            Error::Unsupported => std::io::ErrorKind::Unsupported,
        };
        std::io::Error::new(kind, err)
    }
}

/// Every candidate rejected by [`crate::get_bindable_address`], in the order they were tried.
#[derive(Debug, Default)]
pub struct BindError {
    pub failures: Vec<(String, std::io::Error)>,
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.failures.is_empty() {
            return write!(f, "no candidate address to bind");
        }
        let reasons: Vec<String> = self.failures.iter().map(|(ip, err)| format!("{}: {}", ip, err)).collect();
        write!(f, "no bindable address: {}", reasons.join("; "))
    }
}

impl std::error::Error for BindError {}

impl From<BindError> for std::io::Error {
    fn from(err: BindError) -> Self {
        std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, err)
    }
}

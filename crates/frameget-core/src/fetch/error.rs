//! Error type for a single candidate fetch.

use std::fmt;

/// Why one GET did not produce a complete intermediate file.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection reset, etc.).
    Curl(curl::Error),
    /// Final HTTP response had a non-2xx status.
    Http(u32),
    /// Writing the body to the intermediate file failed.
    Storage(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Storage(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}

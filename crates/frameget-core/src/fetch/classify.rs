//! Classify fetch failures for diagnostics.
//!
//! Nothing is retried on the same URL; the kind only decides how a failed
//! attempt is logged and summarized.

use super::error::FetchError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 404/410: the mirror does not have this frame.
    NotFound,
    /// Any other non-2xx status.
    HttpStatus(u16),
    /// Connect, overall or low-speed timeout.
    Timeout,
    /// DNS, refused, reset, empty reply.
    Connection,
    /// Local disk failure while writing the intermediate.
    Storage,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NotFound => f.write_str("not found"),
            FailureKind::HttpStatus(code) => write!(f, "http {}", code),
            FailureKind::Timeout => f.write_str("timeout"),
            FailureKind::Connection => f.write_str("connection"),
            FailureKind::Storage => f.write_str("storage"),
            FailureKind::Other => f.write_str("other"),
        }
    }
}

pub fn classify_http_status(code: u32) -> FailureKind {
    match code {
        404 | 410 => FailureKind::NotFound,
        _ => FailureKind::HttpStatus(code.min(u16::MAX as u32) as u16),
    }
}

pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return FailureKind::Connection;
    }
    if e.is_write_error() {
        return FailureKind::Storage;
    }
    FailureKind::Other
}

pub fn classify(e: &FetchError) -> FailureKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => classify_http_status(*code),
        FetchError::Storage(_) => FailureKind::Storage,
    }
}

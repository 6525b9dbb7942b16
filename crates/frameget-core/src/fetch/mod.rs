//! Single GET of one candidate URL into a local file.
//!
//! Uses libcurl via the `curl` crate. One attempt per call; fallback across
//! mirrors is the acquirer's job.

mod classify;
mod error;

pub use classify::{classify, classify_curl_error, classify_http_status, FailureKind};
pub use error::FetchError;

use crate::config::TransferConfig;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Downloads `url` into `dest`, returning the number of body bytes written.
///
/// `dest` is created or truncated. On error it may hold a partial body; the
/// caller owns cleanup.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// Blocking libcurl fetcher with explicit timeouts.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    transfer: TransferConfig,
}

impl CurlFetcher {
    pub fn new(transfer: TransferConfig) -> Self {
        Self { transfer }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, url: &str) -> Result<(), curl::Error> {
        let t = &self.transfer;
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&t.user_agent)?;
        easy.connect_timeout(Duration::from_secs(t.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(t.timeout_secs))?;
        easy.low_speed_limit(t.low_speed_limit_bytes)?;
        easy.low_speed_time(Duration::from_secs(t.low_speed_time_secs))?;
        Ok(())
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut file = File::create(dest).map_err(FetchError::Storage)?;

        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, url)?;

        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(FetchError::Storage(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        file.flush().map_err(FetchError::Storage)?;
        tracing::debug!(url, bytes = written, "fetched");
        Ok(written)
    }
}

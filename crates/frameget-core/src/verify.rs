//! Optional structural check of a decompressed frame.

use crate::config::VerifyPolicy;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// FITS files are a sequence of 2880-byte blocks.
pub const FITS_BLOCK: u64 = 2880;

/// Every FITS primary header begins with this card prefix.
const SIMPLE_CARD: &[u8] = b"SIMPLE  =";

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("cannot read frame: {0}")]
    Io(#[from] io::Error),
    #[error("missing FITS primary header")]
    NotFits,
    #[error("size {0} is not a whole number of 2880-byte FITS blocks")]
    BadLength(u64),
}

/// Applies `policy` to the file at `path`.
pub fn verify_frame(policy: VerifyPolicy, path: &Path) -> Result<(), VerifyError> {
    match policy {
        VerifyPolicy::None => Ok(()),
        VerifyPolicy::FitsHeader => check_fits(path),
    }
}

fn check_fits(path: &Path) -> Result<(), VerifyError> {
    let mut f = File::open(path)?;
    let len = f.metadata()?.len();
    let mut head = [0u8; 9];
    let mut filled = 0;
    while filled < head.len() {
        let n = f.read(&mut head[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    if &head[..filled] != SIMPLE_CARD {
        return Err(VerifyError::NotFits);
    }
    if len == 0 || len % FITS_BLOCK != 0 {
        return Err(VerifyError::BadLength(len));
    }
    Ok(())
}

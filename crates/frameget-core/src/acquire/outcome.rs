//! Outcome types for one key and for each candidate attempt.

use crate::fetch::{FailureKind, FetchError};
use crate::verify::VerifyError;
use std::fmt;
use std::path::PathBuf;

/// Where in the pipeline a candidate attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Decompress,
    Verify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Fetch => "fetch",
            Stage::Decompress => "decompress",
            Stage::Verify => "verify",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("{kind}: {source}")]
    Fetch {
        kind: FailureKind,
        #[source]
        source: FetchError,
    },
    #[error("corrupt payload: {0}")]
    Decompress(#[source] std::io::Error),
    #[error("rejected frame: {0}")]
    Verify(#[source] VerifyError),
}

impl AttemptError {
    pub fn stage(&self) -> Stage {
        match self {
            AttemptError::Fetch { .. } => Stage::Fetch,
            AttemptError::Decompress(_) => Stage::Decompress,
            AttemptError::Verify(_) => Stage::Verify,
        }
    }

    /// Fetch failure kind, if the attempt failed before a payload arrived.
    pub fn fetch_kind(&self) -> Option<FailureKind> {
        match self {
            AttemptError::Fetch { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// One candidate URL that did not yield a frame.
#[derive(Debug)]
pub struct AttemptFailure {
    pub url: String,
    pub error: AttemptError,
}

impl AttemptFailure {
    pub fn stage(&self) -> Stage {
        self.error.stage()
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed at {}: {}", self.url, self.stage(), self.error)
    }
}

/// Result of acquiring one key.
#[derive(Debug)]
pub enum Acquisition {
    /// Artifact existed before the call; nothing was fetched.
    AlreadyPresent { path: PathBuf },
    /// A candidate succeeded. `failed` lists the candidates tried before it.
    Downloaded {
        path: PathBuf,
        url: String,
        bytes: u64,
        failed: Vec<AttemptFailure>,
    },
    /// Every candidate failed, in the order they were tried.
    AllFailed { attempts: Vec<AttemptFailure> },
}

impl Acquisition {
    pub fn is_success(&self) -> bool {
        !matches!(self, Acquisition::AllFailed { .. })
    }
}

/// Per-attempt progress, reported while a key is being acquired.
#[derive(Debug)]
pub enum AttemptEvent<'a> {
    /// About to GET candidate `index` (1-based) of `total`.
    Trying {
        index: usize,
        total: usize,
        url: &'a str,
    },
    /// The payload arrived and is being decompressed.
    Fetched { url: &'a str, bytes: u64 },
    Failed { failure: &'a AttemptFailure },
}

//! Acquirer: fetch one frame with ordered fallback across candidate URLs.
//!
//! For a key the acquirer checks whether the artifact already exists, and if
//! not walks the candidate list in order: GET into the intermediate `.fit.gz`,
//! gunzip into `<artifact>.part`, optionally verify, rename into place. The
//! first candidate that gets through every stage wins. Failures are recorded
//! with the stage they happened in and the next candidate is tried.

mod outcome;

pub use outcome::{Acquisition, AttemptError, AttemptEvent, AttemptFailure, Stage};

use crate::candidates::{CandidateSource, UrlTemplates};
use crate::config::{FramegetConfig, VerifyPolicy};
use crate::decompress::gunzip_file;
use crate::fetch::{classify, CurlFetcher, Fetcher};
use crate::key::ObservationKey;
use crate::storage::{self, TransientFile};
use crate::verify::verify_frame;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Explicit per-run settings for the acquirer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquirerConfig {
    pub output_dir: PathBuf,
    pub verify: VerifyPolicy,
}

impl AcquirerConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            verify: VerifyPolicy::None,
        }
    }
}

pub struct Acquirer<C, F> {
    config: AcquirerConfig,
    candidates: C,
    fetcher: F,
}

/// Acquirer wired to the configured URL templates and libcurl.
pub type DefaultAcquirer = Acquirer<UrlTemplates, CurlFetcher>;

impl DefaultAcquirer {
    pub fn from_config(cfg: &FramegetConfig) -> Result<Self> {
        Ok(Acquirer::new(
            AcquirerConfig {
                output_dir: cfg.output_dir.clone(),
                verify: cfg.verify,
            },
            cfg.url_templates()?,
            CurlFetcher::new(cfg.transfer.clone()),
        ))
    }
}

impl<C: CandidateSource, F: Fetcher> Acquirer<C, F> {
    pub fn new(config: AcquirerConfig, candidates: C, fetcher: F) -> Self {
        Self {
            config,
            candidates,
            fetcher,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn acquire(&self, key: &ObservationKey) -> Result<Acquisition> {
        self.acquire_with(key, |_| {})
    }

    /// Like [`Acquirer::acquire`], reporting each attempt to `on_attempt`.
    ///
    /// `Err` is reserved for local problems that make every candidate moot
    /// (output directory unusable, final rename failing). Remote and payload
    /// problems end up in [`Acquisition::AllFailed`].
    pub fn acquire_with<E>(&self, key: &ObservationKey, mut on_attempt: E) -> Result<Acquisition>
    where
        E: FnMut(AttemptEvent<'_>),
    {
        let dir = self.output_dir();
        let artifact = key.artifact_path(dir);
        if artifact.exists() {
            tracing::debug!(%key, path = %artifact.display(), "already present");
            return Ok(Acquisition::AlreadyPresent { path: artifact });
        }

        storage::ensure_dir(dir)?;
        let intermediate = TransientFile::new(key.intermediate_path(dir))
            .context("cannot clear stale intermediate file")?;
        let part = TransientFile::new(storage::temp_path(&artifact))
            .context("cannot clear stale partial frame")?;

        let urls = self.candidates.candidates(key);
        let total = urls.len();
        let mut failed = Vec::new();

        for (i, url) in urls.into_iter().enumerate() {
            on_attempt(AttemptEvent::Trying {
                index: i + 1,
                total,
                url: &url,
            });
            tracing::debug!(%key, attempt = i + 1, url = %url, "trying candidate");

            match self.try_candidate(&url, &intermediate, &part, &mut on_attempt) {
                Ok(bytes) => {
                    part.persist(&artifact).with_context(|| {
                        format!("failed to move frame into {}", artifact.display())
                    })?;
                    tracing::info!(%key, url = %url, bytes, "acquired");
                    return Ok(Acquisition::Downloaded {
                        path: artifact,
                        url,
                        bytes,
                        failed,
                    });
                }
                Err(error) => {
                    let failure = AttemptFailure { url, error };
                    tracing::warn!(%key, stage = %failure.stage(), "{}", failure);
                    on_attempt(AttemptEvent::Failed { failure: &failure });
                    failed.push(failure);
                }
            }
        }

        tracing::warn!(%key, attempts = failed.len(), "all candidates failed");
        Ok(Acquisition::AllFailed { attempts: failed })
    }

    /// One candidate end to end. Leaves neither intermediate nor partial
    /// output behind on failure; the intermediate is also gone on success.
    fn try_candidate<E>(
        &self,
        url: &str,
        intermediate: &TransientFile,
        part: &TransientFile,
        on_attempt: &mut E,
    ) -> Result<u64, AttemptError>
    where
        E: FnMut(AttemptEvent<'_>),
    {
        let fetched = self.fetcher.fetch(url, intermediate.path());
        let fetched_bytes = match fetched {
            Ok(n) => n,
            Err(source) => {
                intermediate.discard();
                let kind = classify(&source);
                return Err(AttemptError::Fetch { kind, source });
            }
        };
        on_attempt(AttemptEvent::Fetched {
            url,
            bytes: fetched_bytes,
        });

        let unpacked = gunzip_file(intermediate.path(), part.path());
        intermediate.discard();
        let bytes = match unpacked {
            Ok(n) => n,
            Err(e) => {
                part.discard();
                return Err(AttemptError::Decompress(e));
            }
        };

        if let Err(e) = verify_frame(self.config.verify, part.path()) {
            part.discard();
            return Err(AttemptError::Verify(e));
        }
        Ok(bytes)
    }
}

//! Sequential run over a set of keys with per-key failure isolation.

use crate::acquire::{Acquirer, Acquisition, AttemptEvent};
use crate::candidates::CandidateSource;
use crate::fetch::Fetcher;
use crate::key::ObservationKey;

/// Progress of a batch run, for console reporting.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// About to acquire key `index` (1-based) of `total`.
    Started {
        index: usize,
        total: usize,
        key: &'a ObservationKey,
    },
    Attempt {
        key: &'a ObservationKey,
        event: AttemptEvent<'a>,
    },
    Finished {
        key: &'a ObservationKey,
        acquisition: &'a Acquisition,
    },
    /// Local error; the key counts as failed and the run continues.
    Errored {
        key: &'a ObservationKey,
        error: &'a anyhow::Error,
    },
}

/// Totals for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub already_present: usize,
    pub failed: Vec<ObservationKey>,
    /// Decompressed bytes written this run.
    pub bytes: u64,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.downloaded + self.already_present + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, key: ObservationKey, acquisition: &Acquisition) {
        match acquisition {
            Acquisition::AlreadyPresent { .. } => self.already_present += 1,
            Acquisition::Downloaded { bytes, .. } => {
                self.downloaded += 1;
                self.bytes += bytes;
            }
            Acquisition::AllFailed { .. } => self.failed.push(key),
        }
    }
}

/// Acquires every key once, in order. Never stops early.
pub fn run_batch<C, F, E>(
    acquirer: &Acquirer<C, F>,
    keys: &[ObservationKey],
    mut on_event: E,
) -> RunSummary
where
    C: CandidateSource,
    F: Fetcher,
    E: FnMut(RunEvent<'_>),
{
    let mut summary = RunSummary::default();
    let total = keys.len();
    for (i, key) in keys.iter().enumerate() {
        on_event(RunEvent::Started {
            index: i + 1,
            total,
            key,
        });
        let result = acquirer.acquire_with(key, |event| on_event(RunEvent::Attempt { key, event }));
        match result {
            Ok(acquisition) => {
                summary.record(*key, &acquisition);
                on_event(RunEvent::Finished {
                    key,
                    acquisition: &acquisition,
                });
            }
            Err(error) => {
                tracing::error!(%key, "acquisition aborted: {:#}", error);
                summary.failed.push(*key);
                on_event(RunEvent::Errored { key, error: &error });
            }
        }
    }
    tracing::info!(
        downloaded = summary.downloaded,
        already_present = summary.already_present,
        failed = summary.failed.len(),
        "run finished"
    );
    summary
}

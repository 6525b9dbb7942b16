//! Observation keys and the filenames derived from them.
//!
//! A key addresses one imaging frame. The local artifact name uses run, camcol
//! and field only; rerun is part of the remote path, not the filename.

use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix of the decompressed artifact.
pub const ARTIFACT_SUFFIX: &str = ".fits";

/// Suffix of the compressed payload as served by the archive.
pub const INTERMEDIATE_SUFFIX: &str = ".fit.gz";

/// (run, rerun, camcol, field) identifying one frame in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationKey {
    pub run: u32,
    pub rerun: u32,
    pub camcol: u32,
    pub field: u32,
}

impl ObservationKey {
    pub fn new(run: u32, rerun: u32, camcol: u32, field: u32) -> Self {
        Self {
            run,
            rerun,
            camcol,
            field,
        }
    }

    /// Common stem: `fpC-{run:06}-r{camcol}-{field:04}`.
    fn stem(&self) -> String {
        format!("fpC-{:06}-r{}-{:04}", self.run, self.camcol, self.field)
    }

    /// Name of the final decompressed file, e.g. `fpC-000094-r2-0012.fits`.
    pub fn artifact_filename(&self) -> String {
        format!("{}{}", self.stem(), ARTIFACT_SUFFIX)
    }

    /// Name of the compressed payload, e.g. `fpC-000094-r2-0012.fit.gz`.
    pub fn intermediate_filename(&self) -> String {
        format!("{}{}", self.stem(), INTERMEDIATE_SUFFIX)
    }

    pub fn artifact_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.artifact_filename())
    }

    pub fn intermediate_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.intermediate_filename())
    }
}

impl fmt::Display for ObservationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run={} rerun={} camcol={} field={}",
            self.run, self.rerun, self.camcol, self.field
        )
    }
}

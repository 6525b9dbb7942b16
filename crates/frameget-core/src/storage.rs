//! File lifecycle in the output directory.
//!
//! Decompressed frames are written to `<name>.part` and renamed onto the final
//! name only once complete, so the presence of the final file always means a
//! finished download. Transient files are owned by [`TransientFile`] guards
//! that delete them on drop.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.fits` -> `a.fits.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates the output directory (and parents) if needed.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

/// Removes `path`, treating "already gone" as success.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Deletes its file when dropped, unless [`TransientFile::persist`] moved it into place.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    armed: bool,
}

impl TransientFile {
    /// Takes ownership of `path`. Any stale file there is removed first.
    pub fn new(path: PathBuf) -> io::Result<Self> {
        remove_if_exists(&path)?;
        Ok(Self { path, armed: true })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file now; it may be recreated and will still be cleaned up on drop.
    pub fn discard(&self) {
        if let Err(e) = remove_if_exists(&self.path) {
            tracing::warn!(path = %self.path.display(), "could not remove transient file: {}", e);
        }
    }

    /// Atomically renames the file onto `final_path` and disarms the guard.
    pub fn persist(mut self, final_path: &Path) -> io::Result<()> {
        std::fs::rename(&self.path, final_path)?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if self.armed {
            self.discard();
        }
    }
}

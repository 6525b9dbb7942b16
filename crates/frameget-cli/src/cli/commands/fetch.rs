//! `frameget fetch` – download every distinct frame of a catalog.

use anyhow::{Context, Result};
use frameget_core::batch::run_batch;
use frameget_core::catalog::read_catalog;
use frameget_core::config::FramegetConfig;
use frameget_core::{storage, DefaultAcquirer};
use std::path::Path;

use crate::cli::{report, with_output_dir};

pub fn run_fetch(
    cfg: &FramegetConfig,
    catalog_path: &Path,
    output_dir: Option<&Path>,
    strict: bool,
) -> Result<()> {
    let cfg = with_output_dir(cfg, output_dir);
    let catalog = read_catalog(catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    storage::ensure_dir(&cfg.output_dir)?;
    let acquirer = DefaultAcquirer::from_config(&cfg)?;

    tracing::info!(
        rows = catalog.rows,
        frames = catalog.keys.len(),
        output_dir = %cfg.output_dir.display(),
        "fetch started"
    );
    println!(
        "Downloading {} fields for {} galaxies\n",
        catalog.keys.len(),
        catalog.rows
    );

    let summary = run_batch(&acquirer, &catalog.keys, report::print_event);
    report::print_summary(&summary, &cfg.output_dir);

    if strict && !summary.is_success() {
        anyhow::bail!("{} frame(s) could not be downloaded", summary.failed.len());
    }
    Ok(())
}

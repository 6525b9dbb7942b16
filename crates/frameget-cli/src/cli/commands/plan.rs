//! `frameget plan` – show what a fetch would do, without network access.

use anyhow::{Context, Result};
use frameget_core::catalog::read_catalog;
use frameget_core::config::FramegetConfig;
use std::path::Path;

use crate::cli::with_output_dir;

pub fn run_plan(cfg: &FramegetConfig, catalog_path: &Path, output_dir: Option<&Path>) -> Result<()> {
    let cfg = with_output_dir(cfg, output_dir);
    let catalog = read_catalog(catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    if catalog.keys.is_empty() {
        println!("Catalog has no rows.");
        return Ok(());
    }

    println!(
        "{:<8} {:<6} {:<6} {:<6} {:<8} {}",
        "RUN", "RERUN", "CAMCOL", "FIELD", "STATE", "FILE"
    );
    let mut present = 0usize;
    for key in &catalog.keys {
        let have = key.artifact_path(&cfg.output_dir).exists();
        if have {
            present += 1;
        }
        println!(
            "{:<8} {:<6} {:<6} {:<6} {:<8} {}",
            key.run,
            key.rerun,
            key.camcol,
            key.field,
            if have { "present" } else { "missing" },
            key.artifact_filename()
        );
    }
    println!(
        "\n{} rows, {} distinct frames, {} present, {} to download into {}",
        catalog.rows,
        catalog.keys.len(),
        present,
        catalog.keys.len() - present,
        cfg.output_dir.display()
    );
    Ok(())
}

//! `frameget urls` – print candidate URLs for one frame.

use anyhow::Result;
use frameget_core::candidates::CandidateSource;
use frameget_core::config::FramegetConfig;
use frameget_core::ObservationKey;

pub fn run_urls(cfg: &FramegetConfig, run: u32, rerun: u32, camcol: u32, field: u32) -> Result<()> {
    let key = ObservationKey::new(run, rerun, camcol, field);
    let templates = cfg.url_templates()?;
    println!("{} -> {}", key, key.artifact_filename());
    for (i, url) in templates.candidates(&key).iter().enumerate() {
        println!("  {}. {}", i + 1, url);
    }
    Ok(())
}

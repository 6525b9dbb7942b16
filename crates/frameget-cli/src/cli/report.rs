//! Console reporting for `frameget fetch`.

use frameget_core::acquire::{Acquisition, AttemptEvent};
use frameget_core::batch::{RunEvent, RunSummary};
use std::path::Path;

fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1_048_576.0
}

/// Prints one line per step, roughly matching what the user watches scroll by.
pub fn print_event(event: RunEvent<'_>) {
    match event {
        RunEvent::Started { index, total, key } => {
            println!(
                "\n[{}/{}] Field {} (run={}, camcol={})",
                index, total, key.field, key.run, key.camcol
            );
            println!("{}", "-".repeat(60));
        }
        RunEvent::Attempt { event, .. } => match event {
            AttemptEvent::Trying { index, url, .. } => println!("Attempt {}: {}", index, url),
            AttemptEvent::Fetched { bytes, .. } => {
                println!("  downloaded {:.1} MiB, decompressing", mib(bytes))
            }
            AttemptEvent::Failed { failure } => {
                println!("  failed ({}): {}", failure.stage(), failure.error)
            }
        },
        RunEvent::Finished { key, acquisition } => match acquisition {
            Acquisition::AlreadyPresent { .. } => {
                println!("Already exists: {}", key.artifact_filename())
            }
            Acquisition::Downloaded { bytes, .. } => {
                println!("OK {} ({:.1} MiB)", key.artifact_filename(), mib(*bytes))
            }
            Acquisition::AllFailed { .. } => {
                println!("All download attempts failed for field {}", key.field)
            }
        },
        RunEvent::Errored { key, error } => {
            println!("Aborted {}: {:#}", key.artifact_filename(), error)
        }
    }
}

pub fn print_summary(summary: &RunSummary, output_dir: &Path) {
    println!("\n{}", "=".repeat(60));
    println!(
        "Download complete: {} downloaded ({:.1} MiB), {} already present, {} failed",
        summary.downloaded,
        mib(summary.bytes),
        summary.already_present,
        summary.failed.len()
    );
    for key in &summary.failed {
        println!("  missing {} ({})", key.artifact_filename(), key);
    }
    println!("Frames are in {}", output_dir.display());
    println!("{}", "=".repeat(60));
}

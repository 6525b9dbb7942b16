//! CLI for frameget.

mod commands;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use frameget_core::config::{self, FramegetConfig};
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_plan, run_urls};

/// Top-level CLI for frameget.
#[derive(Debug, Parser)]
#[command(name = "frameget", version)]
#[command(about = "frameget: download SDSS DR7 fpC frames for a galaxy catalog", long_about = None)]
pub struct Cli {
    /// Read this config file instead of ~/.config/frameget/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download and decompress every distinct frame referenced by a catalog.
    Fetch {
        /// CSV catalog with run, rerun, camcol and field columns.
        catalog: PathBuf,
        /// Directory for the .fits files (overrides `output_dir` in config).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Exit non-zero if any frame could not be downloaded.
        #[arg(long)]
        strict: bool,
    },

    /// List the distinct frames of a catalog and whether each is already on disk.
    Plan {
        /// CSV catalog with run, rerun, camcol and field columns.
        catalog: PathBuf,
        /// Directory to check (overrides `output_dir` in config).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Print the candidate URLs for one frame, in the order they are tried.
    Urls {
        run: u32,
        rerun: u32,
        camcol: u32,
        field: u32,
    },

    /// Generate a shell completion script on stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = load_config(&cli)?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                catalog,
                output_dir,
                strict,
            } => run_fetch(&cfg, &catalog, output_dir.as_deref(), strict)?,
            CliCommand::Plan {
                catalog,
                output_dir,
            } => run_plan(&cfg, &catalog, output_dir.as_deref())?,
            CliCommand::Urls {
                run,
                rerun,
                camcol,
                field,
            } => run_urls(&cfg, run, rerun, camcol, field)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

fn load_config(cli: &Cli) -> Result<FramegetConfig> {
    match &cli.config {
        Some(path) => config::load_from_path(path),
        None => config::load_or_init(),
    }
}

/// Applies a command-line output directory over the configured one.
fn with_output_dir(cfg: &FramegetConfig, output_dir: Option<&std::path::Path>) -> FramegetConfig {
    let mut cfg = cfg.clone();
    if let Some(dir) = output_dir {
        cfg.output_dir = dir.to_path_buf();
    }
    cfg
}

#[cfg(test)]
mod tests;

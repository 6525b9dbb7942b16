//! Tests for the fetch and plan subcommands.

use super::{parse, parse_cli};
use crate::cli::commands::run_fetch;
use crate::cli::{with_output_dir, Cli, CliCommand};
use clap::Parser;
use frameget_core::config::FramegetConfig;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_fetch() {
    match parse(&["frameget", "fetch", "galaxy_parameters_dr7.csv"]) {
        CliCommand::Fetch {
            catalog,
            output_dir,
            strict,
        } => {
            assert_eq!(catalog, PathBuf::from("galaxy_parameters_dr7.csv"));
            assert!(output_dir.is_none());
            assert!(!strict);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_output_dir_and_strict() {
    match parse(&["frameget", "fetch", "g.csv", "-o", "/data/frames", "--strict"]) {
        CliCommand::Fetch {
            output_dir, strict, ..
        } => {
            assert_eq!(output_dir.as_deref(), Some(Path::new("/data/frames")));
            assert!(strict);
        }
        _ => panic!("expected Fetch with -o and --strict"),
    }
}

#[test]
fn cli_parse_fetch_requires_catalog() {
    assert!(Cli::try_parse_from(["frameget", "fetch"]).is_err());
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = parse_cli(&["frameget", "fetch", "g.csv", "--config", "/etc/frameget.toml"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/frameget.toml")));
    assert!(matches!(cli.command, CliCommand::Fetch { .. }));
}

#[test]
fn cli_parse_plan() {
    match parse(&["frameget", "plan", "g.csv", "--output-dir", "out"]) {
        CliCommand::Plan {
            catalog,
            output_dir,
        } => {
            assert_eq!(catalog, PathBuf::from("g.csv"));
            assert_eq!(output_dir.as_deref(), Some(Path::new("out")));
        }
        _ => panic!("expected Plan"),
    }
}

#[test]
fn output_dir_flag_overrides_config() {
    let cfg = FramegetConfig::default();
    assert_eq!(with_output_dir(&cfg, None).output_dir, cfg.output_dir);
    assert_eq!(
        with_output_dir(&cfg, Some(Path::new("/tmp/x"))).output_dir,
        PathBuf::from("/tmp/x")
    );
}

/// Config whose only mirror is a closed local port: every fetch is refused.
fn unreachable_config() -> FramegetConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let mut cfg = FramegetConfig::default();
    cfg.output_dir = PathBuf::from("unused-default-dir");
    cfg.templates = vec![format!("http://127.0.0.1:{port}/{{filename_gz}}")];
    cfg.transfer.connect_timeout_secs = 5;
    cfg.transfer.timeout_secs = 10;
    cfg
}

fn write_catalog(dir: &Path) -> PathBuf {
    let catalog = dir.join("g.csv");
    std::fs::write(&catalog, "run,rerun,camcol,field\n94,301,2,12\n94,301,2,12\n").unwrap();
    catalog
}

#[test]
fn fetch_with_failed_frames_still_succeeds_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());
    let out = dir.path().join("frames");

    run_fetch(&unreachable_config(), &catalog, Some(&out), false).unwrap();
    // -o wins over the configured output_dir.
    assert!(out.is_dir());
    assert!(!Path::new("unused-default-dir").exists());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn fetch_strict_fails_when_a_frame_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());
    let out = dir.path().join("frames");

    let err = run_fetch(&unreachable_config(), &catalog, Some(&out), true).unwrap_err();
    assert!(err.to_string().contains("could not be downloaded"), "{err}");
    assert!(!out.join("fpC-000094-r2-0012.fits").exists());
}

#[test]
fn fetch_strict_succeeds_when_every_frame_is_present() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());
    let out = dir.path().join("frames");
    std::fs::create_dir(&out).unwrap();
    std::fs::write(out.join("fpC-000094-r2-0012.fits"), b"kept").unwrap();

    run_fetch(&unreachable_config(), &catalog, Some(&out), true).unwrap();
    assert_eq!(std::fs::read(out.join("fpC-000094-r2-0012.fits")).unwrap(), b"kept");
}

#[test]
fn fetch_missing_catalog_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_fetch(
        &unreachable_config(),
        &dir.path().join("none.csv"),
        Some(dir.path()),
        false,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("loading catalog"));
}

use crate::candidates::{UrlTemplates, DEFAULT_TEMPLATES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Transfer limits for each GET (optional `[transfer]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Seconds allowed to establish a connection.
    pub connect_timeout_secs: u64,
    /// Upper bound on a whole transfer in seconds.
    pub timeout_secs: u64,
    /// Abort when the rate stays below this many bytes/s...
    pub low_speed_limit_bytes: u32,
    /// ...for this many seconds.
    pub low_speed_time_secs: u64,
    pub user_agent: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 600,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            user_agent: concat!("frameget/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// What to check on a decompressed frame before keeping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerifyPolicy {
    /// Trust the archive; any gzip stream that decodes is accepted.
    #[default]
    None,
    /// Require a FITS primary header and a whole number of 2880-byte blocks.
    FitsHeader,
}

/// Global configuration loaded from `~/.config/frameget/config.toml`.
/// Missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramegetConfig {
    /// Directory that receives the decompressed frames.
    pub output_dir: PathBuf,
    /// URL templates tried in order for each frame.
    pub templates: Vec<String>,
    pub verify: VerifyPolicy,
    pub transfer: TransferConfig,
}

impl Default for FramegetConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("sdss_images"),
            templates: DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect(),
            verify: VerifyPolicy::None,
            transfer: TransferConfig::default(),
        }
    }
}

impl FramegetConfig {
    /// Parses the configured templates into a candidate source.
    pub fn url_templates(&self) -> Result<UrlTemplates> {
        UrlTemplates::new(&self.templates).context("invalid `templates` in config")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("frameget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FramegetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FramegetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load an explicit config file. Never writes.
pub fn load_from_path(path: &Path) -> Result<FramegetConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FramegetConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

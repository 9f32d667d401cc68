use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::{CurlOptions, DEFAULT_ATTEMPT_BUDGET};
use crate::filter::LineFilter;
use crate::segment::EofPolicy;

/// Fetch worker parameters (`[fetch]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Attempts per artifact, including the first.
    pub attempt_budget: u32,
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per attempt.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            connect_timeout_secs: 30,
            timeout_secs: 300,
        }
    }
}

impl FetchConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Triage pass parameters (`[triage]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Retry counters whose attempt lines are dropped as noise.
    pub noisy_retry_counters: Vec<u32>,
    /// Write the last session of a combined log even though no marker follows it.
    pub flush_last_segment: bool,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            noisy_retry_counters: LineFilter::default().noisy_counters().to_vec(),
            flush_last_segment: false,
        }
    }
}

impl TriageConfig {
    pub fn line_filter(&self) -> LineFilter {
        LineFilter::new(self.noisy_retry_counters.iter().copied())
    }

    pub fn eof_policy(&self) -> EofPolicy {
        if self.flush_last_segment {
            EofPolicy::Flush
        } else {
            EofPolicy::Preserve
        }
    }
}

/// Global configuration loaded from `~/.config/ltriage/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LtriageConfig {
    /// Root of per-entity media directories; the current directory when unset.
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub triage: TriageConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ltriage")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LtriageConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LtriageConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LtriageConfig = toml::from_str(&data)?;
    Ok(cfg)
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::entry_path::{NormalizeMode, PathOptions, DEFAULT_EXTENSION};
use crate::store::{DEFAULT_GPG_CANDIDATES, DEFAULT_STORE_PATH};

/// Global configuration loaded from `~/.config/csv2pass/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Csv2PassConfig {
    /// Password store root; a leading `~/` is expanded against `$HOME`.
    pub store_path: String,
    /// Extension of encrypted entries.
    pub extension: String,
    /// CSV field delimiter (single ASCII character).
    pub delimiter: char,
    /// Whether punctuation is stripped from titles used as path segments.
    #[serde(default)]
    pub normalize: NormalizeMode,
    /// Optional gpg binaries to probe, in order; if missing, the built-in list is used.
    #[serde(default)]
    pub gpg_candidates: Option<Vec<String>>,
}

impl Default for Csv2PassConfig {
    fn default() -> Self {
        Self {
            store_path: DEFAULT_STORE_PATH.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            delimiter: ',',
            normalize: NormalizeMode::Preserve,
            gpg_candidates: None,
        }
    }
}

impl Csv2PassConfig {
    /// Delimiter as the byte the CSV reader wants.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            anyhow::bail!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )
        }
    }

    pub fn path_options(&self) -> PathOptions {
        PathOptions {
            extension: self.extension.clone(),
            normalize: self.normalize,
        }
    }

    pub fn gpg_candidates(&self) -> Vec<String> {
        match &self.gpg_candidates {
            Some(list) => list.clone(),
            None => DEFAULT_GPG_CANDIDATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("csv2pass")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Csv2PassConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<Csv2PassConfig> {
    if !path.exists() {
        let default_cfg = Csv2PassConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    read_at(path)
}

/// Like [`load_or_init`], but a missing file yields the defaults without
/// creating it. Used for dry runs.
pub fn load_or_default() -> Result<Csv2PassConfig> {
    load_or_default_at(&config_path()?)
}

pub fn load_or_default_at(path: &Path) -> Result<Csv2PassConfig> {
    if !path.exists() {
        return Ok(Csv2PassConfig::default());
    }
    read_at(path)
}

fn read_at(path: &Path) -> Result<Csv2PassConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Csv2PassConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

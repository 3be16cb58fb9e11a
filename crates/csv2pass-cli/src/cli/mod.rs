//! CLI for csv2pass.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csv2pass_core::config::{self, Csv2PassConfig};
use csv2pass_core::entry_path::NormalizeMode;
use csv2pass_core::import::ImportOptions;
use csv2pass_core::store;
use csv2pass_core::writer::PreviewFormat;
use std::ffi::OsString;
use std::path::PathBuf;

use commands::{run_completions, run_import, run_man};

/// Top-level CLI for csv2pass.
#[derive(Debug, Parser)]
#[command(name = "csv2pass")]
#[command(
    about = "Import a password-manager CSV export into a pass-compatible gpg store",
    long_about = None
)]
pub struct Cli {
    /// CSV export to read (first row is treated as a header).
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Password store base path [default: store_path from config, ~/.password-store/].
    #[arg(long, visible_alias = "storePath", value_name = "PATH")]
    pub store_path: Option<String>,

    /// Print what would be written instead of encrypting anything.
    #[arg(long, visible_alias = "dry-run")]
    pub dryrun: bool,

    /// Dry-run preview format.
    #[arg(long, value_enum, default_value_t = PreviewArg::Text)]
    pub preview: PreviewArg,

    /// Drop punctuation from titles used as path segments.
    #[arg(long)]
    pub strip_punctuation: bool,

    /// Print shell completions and exit.
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Print a roff man page and exit.
    #[arg(long)]
    pub man: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewArg {
    Text,
    Json,
}

impl From<PreviewArg> for PreviewFormat {
    fn from(p: PreviewArg) -> Self {
        match p {
            PreviewArg::Text => PreviewFormat::Text,
            PreviewArg::Json => PreviewFormat::Json,
        }
    }
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse_from(long_single_dash_flags(std::env::args_os())).run()
    }

    pub fn run(self) -> Result<()> {
        if let Some(shell) = self.completions {
            return run_completions(shell);
        }
        if self.man {
            return run_man();
        }

        if self.file.is_none() {
            anyhow::bail!("missing file (pass --file <PATH>)");
        }
        // A dry run leaves the filesystem alone, config file included.
        let cfg = if self.dryrun {
            config::load_or_default()?
        } else {
            config::load_or_init()?
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let opts = self.import_options(&cfg)?;
        run_import(&opts)
    }

    /// Merge flags over config into the options for one import run.
    pub fn import_options(&self, cfg: &Csv2PassConfig) -> Result<ImportOptions> {
        let input = self.file.clone().context("missing file")?;
        let raw_store = self.store_path.as_deref().unwrap_or(&cfg.store_path);
        let store_root = store::expand_store_path(raw_store)?;

        let mut paths = cfg.path_options();
        if self.strip_punctuation {
            paths.normalize = NormalizeMode::StripPunctuation;
        }

        Ok(ImportOptions {
            input,
            store_root,
            dry_run: self.dryrun,
            preview: self.preview.into(),
            delimiter: cfg.delimiter_byte()?,
            paths,
            gpg_candidates: cfg.gpg_candidates(),
        })
    }
}

/// Flags also accepted with a single dash, as `pass` import scripts spell them.
const SINGLE_DASH_LONG: [&str; 3] = ["file", "storePath", "dryrun"];

/// Rewrite `-file`, `-storePath` and `-dryrun` (with or without `=value`)
/// to their `--` form so clap does not read them as bundled short flags.
/// Arguments after `--` are left alone.
pub fn long_single_dash_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        let arg = arg.into();
        if !passthrough {
            if arg == "--" {
                passthrough = true;
            } else if let Some(name) = arg.to_str().and_then(|a| a.strip_prefix('-')) {
                let flag = name.split_once('=').map_or(name, |(flag, _)| flag);
                if SINGLE_DASH_LONG.contains(&flag) {
                    out.push(OsString::from(format!("--{name}")));
                    continue;
                }
            }
        }
        out.push(arg);
    }
    out
}

#[cfg(test)]
mod tests;

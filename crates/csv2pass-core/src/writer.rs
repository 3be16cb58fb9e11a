//! Writes records into the store, or previews them in dry-run mode.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::content::{format_entry, GopassEntry};
use crate::encrypt::Encryptor;
use crate::entry_path::{derive_destination, Destination, PathOptions};
use crate::error::WriteError;
use crate::record::CredentialRecord;

/// First free path for `path`: the path itself, else `<path>_1`, `<path>_2`, ...
///
/// Returns the suffix used, if any. Check-then-create; not safe against a
/// second process writing the same store.
pub fn unique_path(path: &Path) -> (PathBuf, Option<u32>) {
    if !path.exists() {
        return (path.to_path_buf(), None);
    }
    let mut n = 1u32;
    loop {
        let candidate = suffixed_path(path, n);
        if !candidate.exists() {
            return (candidate, Some(n));
        }
        n += 1;
    }
}

/// `entry.gpg` → `entry.gpg_<n>`.
pub fn suffixed_path(path: &Path, n: u32) -> PathBuf {
    let mut o = path.as_os_str().to_owned();
    o.push(format!("_{n}"));
    PathBuf::from(o)
}

/// How dry-run previews are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    /// Target directory, file name and the full plaintext.
    #[default]
    Text,
    /// One gopass JSON object per line.
    Json,
}

/// What a dry run would have written for one record.
#[derive(Debug, Clone)]
pub struct Preview {
    pub dir: PathBuf,
    pub destination: Destination,
    pub content: String,
    pub gopass: GopassEntry,
}

impl Preview {
    pub fn write_to(&self, out: &mut dyn Write, format: PreviewFormat) -> io::Result<()> {
        match format {
            PreviewFormat::Text => {
                writeln!(out, "Would create: {}", self.dir.display())?;
                writeln!(out, "File: {}", self.destination.file_name())?;
                writeln!(out, "{}", self.content)
            }
            PreviewFormat::Json => {
                serde_json::to_writer(&mut *out, &self.gopass)?;
                writeln!(out)
            }
        }
    }
}

/// Result of handling one record.
#[derive(Debug, Clone)]
pub enum Outcome {
    Written {
        path: PathBuf,
        /// Collision suffix appended to the path, if any.
        suffix: Option<u32>,
    },
    Preview(Preview),
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub written: usize,
    /// Written under a `_<n>` name because the plain name was taken.
    pub renamed: usize,
    pub previewed: usize,
}

/// Per-run writer. Holds the resolved key id and encryptor; no globals.
pub struct Writer<'a, E: Encryptor> {
    store_root: &'a Path,
    key_id: &'a str,
    encryptor: &'a E,
    paths: &'a PathOptions,
    dry_run: bool,
    summary: ImportSummary,
}

impl<'a, E: Encryptor> Writer<'a, E> {
    pub fn new(
        store_root: &'a Path,
        key_id: &'a str,
        encryptor: &'a E,
        paths: &'a PathOptions,
        dry_run: bool,
    ) -> Self {
        Self {
            store_root,
            key_id,
            encryptor,
            paths,
            dry_run,
            summary: ImportSummary::default(),
        }
    }

    pub fn summary(&self) -> ImportSummary {
        self.summary
    }

    /// Write `record`, or build its preview in dry-run mode.
    ///
    /// A dry run touches neither the store nor the encryptor.
    pub fn process(&mut self, record: &CredentialRecord) -> Result<Outcome, WriteError> {
        let destination = derive_destination(record, self.paths);
        let content = format_entry(record);

        if self.dry_run {
            self.summary.previewed += 1;
            return Ok(Outcome::Preview(Preview {
                dir: destination.dir_under(self.store_root),
                gopass: GopassEntry::new(record, &destination),
                destination,
                content,
            }));
        }

        let target = destination.path_under(self.store_root);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let (path, suffix) = unique_path(&target);
        if suffix.is_some() {
            tracing::warn!(
                "{} exists, writing {} instead",
                target.display(),
                path.display()
            );
        }

        self.encryptor
            .encrypt(self.key_id, content.as_bytes(), &path)
            .map_err(|source| WriteError::Encrypt {
                path: path.clone(),
                source,
            })?;

        tracing::info!("created: {}", path.display());
        self.summary.written += 1;
        if suffix.is_some() {
            self.summary.renamed += 1;
        }
        Ok(Outcome::Written { path, suffix })
    }
}

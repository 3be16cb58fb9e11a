//! Store path derivation.
//!
//! Every credential lands at `<group>/<subject>/<name>.<ext>` below the store
//! root. The subject is the URL host when there is one, otherwise the
//! normalized title; the name is the username, otherwise the normalized
//! title.

mod normalize;

pub use normalize::{normalize, NormalizeMode};

use std::path::{Path, PathBuf};

use crate::record::CredentialRecord;

/// Extension `pass` and `gopass` expect on encrypted entries.
pub const DEFAULT_EXTENSION: &str = "gpg";

/// Settings that shape derived paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
    pub extension: String,
    pub normalize: NormalizeMode,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            normalize: NormalizeMode::default(),
        }
    }
}

/// Where one record goes, relative to the store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// `group/subject`, always exactly one `/` between the two parts.
    pub dir: String,
    /// File name without the extension.
    pub name: String,
    pub extension: String,
}

impl Destination {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }

    /// Entry name as `pass` shows it: `group/subject/name`.
    pub fn entry_name(&self) -> String {
        format!("{}/{}", self.dir, self.name)
    }

    /// Absolute directory for this entry below `root`.
    ///
    /// Empty, `.` and `..` segments are dropped so a group, host or title
    /// can never point outside the store.
    pub fn dir_under(&self, root: &Path) -> PathBuf {
        push_segments(root.to_path_buf(), &self.dir)
    }

    /// Absolute path of the encrypted file below `root`. A `/` inside the
    /// name (e.g. a username like `ops/admin`) nests one level deeper.
    pub fn path_under(&self, root: &Path) -> PathBuf {
        push_segments(self.dir_under(root), &self.file_name())
    }
}

fn push_segments(mut base: PathBuf, rel: &str) -> PathBuf {
    for segment in rel.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        base.push(segment);
    }
    base
}

/// Compute where `record` is stored. Pure and total: empty fields give
/// empty segments rather than an error.
pub fn derive_destination(record: &CredentialRecord, opts: &PathOptions) -> Destination {
    let host = record.url.host();
    let subject = if host.is_empty() {
        normalize(&record.title, opts.normalize)
    } else {
        host.to_string()
    };
    let name = if record.username.is_empty() {
        normalize(&record.title, opts.normalize)
    } else {
        record.username.clone()
    };

    Destination {
        dir: format!("{}/{}", record.group_name, subject),
        name,
        extension: opts.extension.clone(),
    }
}

//! Error types for the import pipeline.
//!
//! Each stage has its own error so callers can tell a bad export from a
//! broken store or a failing gpg run. [`ImportError`] is what the driver
//! returns; the CLI wraps it in `anyhow` and exits.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::record::Column;

/// Failure reading or interpreting the CSV export.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open export file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read CSV row at line {line}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Row is shorter than the fixed column layout requires.
    #[error(
        "line {line}: missing column `{column}` (row has {found} fields, expected at least {expected})"
    )]
    MissingColumn {
        line: u64,
        column: Column,
        found: usize,
        expected: usize,
    },
}

/// Failure resolving the store key id or the gpg binary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read key id from {}", .path.display())]
    KeyId {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("key id file {} is empty", .path.display())]
    EmptyKeyId { path: PathBuf },

    #[error("unable to detect the location of the gpg binary to use (tried: {})", .tried.join(", "))]
    BinaryNotFound { tried: Vec<String> },

    #[error("cannot expand `~` in store path: HOME is not set")]
    NoHome,
}

/// Failure running the encryption binary for one entry.
#[derive(Debug, Error)]
pub enum EncryptError {
    #[error("failed to start {binary}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to pass plaintext to {binary}")]
    Stdin {
        binary: String,
        #[source]
        source: io::Error,
    },

    /// Binary ran but exited unsuccessfully; `stderr` is what it printed.
    #[error("{binary} failed ({}), stderr: {}", describe_exit(.code), .stderr.trim())]
    Failed {
        binary: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "terminated by signal".to_string(),
    }
}

/// Failure writing one entry into the store.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encrypt {}", .path.display())]
    Encrypt {
        path: PathBuf,
        #[source]
        source: EncryptError,
    },
}

/// Anything that aborts an import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("failed to write dry-run preview")]
    Preview(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_failure_message_includes_status_and_stderr() {
        let err = EncryptError::Failed {
            binary: "gpg2".to_string(),
            code: Some(2),
            stderr: "gpg: ABCD: skipped: No public key\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "gpg2 failed (exit status 2), stderr: gpg: ABCD: skipped: No public key"
        );
    }

    #[test]
    fn encrypt_failure_by_signal() {
        let err = EncryptError::Failed {
            binary: "gpg".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn binary_not_found_lists_candidates() {
        let err = StoreError::BinaryNotFound {
            tried: vec!["gpg2".to_string(), "gpg".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unable to detect the location of the gpg binary to use (tried: gpg2, gpg)"
        );
    }

    #[test]
    fn missing_column_message() {
        let err = ParseError::MissingColumn {
            line: 4,
            column: Column::Id,
            found: 7,
            expected: 10,
        };
        assert_eq!(
            err.to_string(),
            "line 4: missing column `id` (row has 7 fields, expected at least 10)"
        );
    }
}

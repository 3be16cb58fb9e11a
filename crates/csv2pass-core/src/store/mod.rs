//! Password store discovery: store root, recipient key id, gpg binary.

mod binary;

pub use binary::{detect_binary, detect_gpg_binary, probe_version, DEFAULT_GPG_CANDIDATES};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// File in the store root holding the recipient key id.
pub const KEY_ID_FILE: &str = ".gpg-id";

/// Default store location, same as `pass`.
pub const DEFAULT_STORE_PATH: &str = "~/.password-store/";

/// Expand a leading `~/` against `$HOME`. Other paths are returned as is.
pub fn expand_store_path(path: &str) -> Result<PathBuf, StoreError> {
    expand_with_home(path, std::env::var_os("HOME"))
}

fn expand_with_home(path: &str, home: Option<OsString>) -> Result<PathBuf, StoreError> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = home.filter(|h| !h.is_empty()).ok_or(StoreError::NoHome)?;
            Ok(PathBuf::from(home).join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Read the recipient key id from `<store_root>/.gpg-id`, trimmed.
pub fn read_key_id(store_root: &Path) -> Result<String, StoreError> {
    let path = store_root.join(KEY_ID_FILE);
    let raw = fs::read_to_string(&path).map_err(|source| StoreError::KeyId {
        path: path.clone(),
        source,
    })?;
    let key_id = raw.trim();
    if key_id.is_empty() {
        return Err(StoreError::EmptyKeyId { path });
    }
    tracing::debug!(key_id, "read key id from {}", path.display());
    Ok(key_id.to_string())
}

//! Plaintext written into each encrypted entry, plus the gopass JSON shape
//! used for previews.

use serde::Serialize;

use crate::entry_path::Destination;
use crate::record::CredentialRecord;

/// Render `record` as a password-store entry.
///
/// The password goes on the first line on its own because `pass show -c`
/// and friends treat line one as the secret. Values are written verbatim.
pub fn format_entry(record: &CredentialRecord) -> String {
    let url = record.url.to_string();
    let mut out = String::new();
    out.push_str(&record.password);
    out.push('\n');
    for (label, value) in [
        ("title", record.title.as_str()),
        ("password", record.password.as_str()),
        ("login", record.username.as_str()),
        ("url", url.as_str()),
        ("group", record.group_name.as_str()),
        ("comments", record.notes.as_str()),
    ] {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// A gopass `insert --json` style entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GopassEntry {
    #[serde(rename = "entry_name")]
    pub name: String,
    pub login: String,
    pub password: String,
    #[serde(rename = "length")]
    pub password_length: usize,
    pub generate: bool,
    pub use_symbols: bool,
}

impl GopassEntry {
    pub fn new(record: &CredentialRecord, dest: &Destination) -> Self {
        Self {
            name: dest.entry_name(),
            login: record.username.clone(),
            password: record.password.clone(),
            password_length: record.password.chars().count(),
            generate: false,
            use_symbols: false,
        }
    }
}

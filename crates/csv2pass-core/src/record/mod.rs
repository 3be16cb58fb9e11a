//! Credential records read from a password-manager CSV export.
//!
//! The export has a fixed positional layout; [`Column`] names the positions
//! we read so a short row can be reported by column instead of by index.

mod parse;
mod entry_url;

pub use parse::{parse_file, parse_reader};
pub use entry_url::EntryUrl;

use std::fmt;

/// Minimum number of fields in a data row.
pub const MIN_FIELDS: usize = 10;

/// Columns of the export that end up in a [`CredentialRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    GroupId,
    GroupName,
    Title,
    Username,
    Password,
    Url,
    Notes,
    Id,
}

impl Column {
    /// All mapped columns, ordered by position.
    pub const ALL: [Column; 8] = [
        Column::GroupId,
        Column::GroupName,
        Column::Title,
        Column::Username,
        Column::Password,
        Column::Url,
        Column::Notes,
        Column::Id,
    ];

    /// Zero-based field position in a data row.
    pub const fn index(self) -> usize {
        match self {
            Column::GroupId => 0,
            Column::GroupName => 1,
            Column::Title => 2,
            Column::Username => 3,
            Column::Password => 4,
            Column::Url => 5,
            Column::Notes => 6,
            // 7 and 8 repeat the group id/name and are ignored.
            Column::Id => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Column::GroupId => "group_id",
            Column::GroupName => "group_name",
            Column::Title => "title",
            Column::Username => "username",
            Column::Password => "password",
            Column::Url => "url",
            Column::Notes => "notes",
            Column::Id => "id",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One credential from the export. Read-only once parsed.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: String,
    pub group_id: String,
    /// Lowercased group name; first path segment in the store.
    pub group_name: String,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: EntryUrl,
    pub notes: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("group_id", &self.group_id)
            .field("group_name", &self.group_name)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}

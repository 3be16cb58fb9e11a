//! CSV export reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Column, CredentialRecord, EntryUrl, MIN_FIELDS};
use crate::error::ParseError;

/// Read every data row of the export at `path`.
///
/// Stops at the first bad row; nothing after it is returned.
pub fn parse_file(path: &Path, delimiter: u8) -> Result<Vec<CredentialRecord>, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_reader(file, delimiter)?;
    tracing::debug!(
        "parsed {} record(s) from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Read every data row from `input`. The first row is a header and is
/// skipped without looking at it.
pub fn parse_reader<R: Read>(input: R, delimiter: u8) -> Result<Vec<CredentialRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = reader.records();
    // Header: contents and read errors alike are ignored.
    let _ = rows.next();

    let mut records = Vec::new();
    let mut last_line = 1;
    for result in rows {
        let row = result.map_err(|source| ParseError::Csv {
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(last_line + 1),
            source,
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(last_line + 1);
        last_line = line;
        records.push(record_from_row(&row, line)?);
    }
    Ok(records)
}

fn record_from_row(row: &csv::StringRecord, line: u64) -> Result<CredentialRecord, ParseError> {
    if row.len() < MIN_FIELDS {
        let column = Column::ALL
            .into_iter()
            .find(|c| c.index() >= row.len())
            .unwrap_or(Column::Id);
        return Err(ParseError::MissingColumn {
            line,
            column,
            found: row.len(),
            expected: MIN_FIELDS,
        });
    }

    let field = |c: Column| row.get(c.index()).unwrap_or_default();
    Ok(CredentialRecord {
        id: field(Column::Id).to_string(),
        group_id: field(Column::GroupId).to_string(),
        group_name: field(Column::GroupName).to_lowercase(),
        title: field(Column::Title).to_string(),
        username: field(Column::Username).to_string(),
        password: field(Column::Password).to_string(),
        url: EntryUrl::parse(field(Column::Url)),
        notes: field(Column::Notes).to_string(),
    })
}

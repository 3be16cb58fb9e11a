//! Import driver: parse, resolve key and binary, then write every record.

use std::io::Write;
use std::path::PathBuf;

use crate::encrypt::{Encryptor, GpgEncryptor};
use crate::entry_path::PathOptions;
use crate::error::{ImportError, StoreError};
use crate::record;
use crate::store;
use crate::writer::{ImportSummary, Outcome, PreviewFormat, Writer};

/// Everything one run needs, already merged from config and flags.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub input: PathBuf,
    /// Store root with `~` already expanded.
    pub store_root: PathBuf,
    pub dry_run: bool,
    pub preview: PreviewFormat,
    pub delimiter: u8,
    pub paths: PathOptions,
    pub gpg_candidates: Vec<String>,
}

/// Run an import with the real gpg binary.
pub fn run_import(opts: &ImportOptions, out: &mut dyn Write) -> Result<ImportSummary, ImportError> {
    run_import_with(opts, out, |candidates| {
        let gpg = GpgEncryptor::new(store::detect_gpg_binary(candidates)?);
        tracing::info!(binary = gpg.binary(), "using encryption binary");
        Ok(gpg)
    })
}

/// Run an import, building the encryptor with `resolve_encryptor` from the
/// configured candidate list.
///
/// Order matters and every step is fatal: the whole export is parsed before
/// the store is looked at, and the key id and binary are resolved before the
/// first record is written. Dry-run previews go to `out`.
pub fn run_import_with<E, F>(
    opts: &ImportOptions,
    out: &mut dyn Write,
    resolve_encryptor: F,
) -> Result<ImportSummary, ImportError>
where
    E: Encryptor,
    F: FnOnce(&[String]) -> Result<E, StoreError>,
{
    let records = record::parse_file(&opts.input, opts.delimiter)?;
    tracing::info!(
        "read {} record(s) from {}",
        records.len(),
        opts.input.display()
    );

    let key_id = store::read_key_id(&opts.store_root)?;
    let encryptor = resolve_encryptor(&opts.gpg_candidates)?;

    let mut writer = Writer::new(
        &opts.store_root,
        &key_id,
        &encryptor,
        &opts.paths,
        opts.dry_run,
    );
    for record in &records {
        if let Outcome::Preview(preview) = writer.process(record)? {
            preview
                .write_to(out, opts.preview)
                .map_err(ImportError::Preview)?;
        }
    }

    let summary = writer.summary();
    tracing::info!(
        written = summary.written,
        renamed = summary.renamed,
        previewed = summary.previewed,
        "import finished"
    );
    Ok(summary)
}

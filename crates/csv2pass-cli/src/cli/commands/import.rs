//! `csv2pass --file <path>` – import an export into the store.

use anyhow::{Context, Result};
use csv2pass_core::import::{self, ImportOptions};
use csv2pass_core::writer::PreviewFormat;
use std::io::{self, Write};

pub fn run_import(opts: &ImportOptions) -> Result<()> {
    tracing::info!(
        input = %opts.input.display(),
        store = %opts.store_root.display(),
        dry_run = opts.dry_run,
        "starting import"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = import::run_import(opts, &mut out)
        .with_context(|| format!("import of {} failed", opts.input.display()))?;
    out.flush()?;

    if opts.dry_run {
        // Keep JSON previews machine-readable.
        if opts.preview == PreviewFormat::Text {
            println!(
                "Dry run: {} entr{} previewed, nothing written.",
                summary.previewed,
                if summary.previewed == 1 { "y" } else { "ies" }
            );
        }
    } else {
        println!(
            "Imported {} entr{} into {}",
            summary.written,
            if summary.written == 1 { "y" } else { "ies" },
            opts.store_root.display()
        );
        if summary.renamed > 0 {
            println!(
                "  ({} written with a numeric suffix because the name was taken)",
                summary.renamed
            );
        }
    }
    Ok(())
}

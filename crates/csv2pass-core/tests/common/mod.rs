pub mod fake_gpg;

use std::fs;
use std::path::{Path, PathBuf};

use csv2pass_core::entry_path::PathOptions;
use csv2pass_core::import::ImportOptions;
use csv2pass_core::writer::PreviewFormat;

pub const HEADER: &str =
    "!group_id,!group_name,title,username,password,URL,Notes,!group_id,!group_name,id\n";

/// Write `rows` (after the header) to `<dir>/export.csv`.
pub fn write_export(dir: &Path, rows: &str) -> PathBuf {
    let path = dir.join("export.csv");
    fs::write(&path, format!("{HEADER}{rows}")).unwrap();
    path
}

/// Create a store root with a `.gpg-id`.
pub fn init_store(dir: &Path, key_id: &str) -> PathBuf {
    let store = dir.join("store");
    fs::create_dir_all(&store).unwrap();
    fs::write(store.join(".gpg-id"), format!("{key_id}\n")).unwrap();
    store
}

pub fn options(input: PathBuf, store_root: PathBuf, dry_run: bool) -> ImportOptions {
    ImportOptions {
        input,
        store_root,
        dry_run,
        preview: PreviewFormat::Text,
        delimiter: b',',
        paths: PathOptions::default(),
        gpg_candidates: vec!["fake-gpg".to_string()],
    }
}

/// Every regular file below `root`, relative, sorted. `.gpg-id` excluded.
pub fn store_files(root: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(base, &path, out);
            } else if path.file_name().map_or(false, |n| n != ".gpg-id") {
                out.push(path.strip_prefix(base).unwrap().to_string_lossy().into_owned());
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

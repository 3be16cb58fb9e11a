pub mod config;
pub mod logging;

pub mod content;
pub mod encrypt;
pub mod entry_path;
pub mod error;
pub mod import;
pub mod record;
pub mod store;
pub mod writer;

//! CLI command handlers. Each command is in its own file for clarity.

mod completions;
mod import;
mod man;

pub use completions::run_completions;
pub use import::run_import;
pub use man::run_man;

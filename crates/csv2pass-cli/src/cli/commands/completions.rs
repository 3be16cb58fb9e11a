//! `csv2pass --completions <shell>` – print shell completions.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

pub fn run_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "csv2pass", &mut std::io::stdout());
    Ok(())
}

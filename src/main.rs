use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simple_row_store::{error::StorageResult, repl, Table};

/// Single-table row store driven by `insert` and `select` commands.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Database file, created if it does not exist
    db_path: PathBuf,
}

fn run(cli: &Cli) -> StorageResult<()> {
    let table = Table::open(&cli.db_path)?;
    repl::run(table, io::stdin().lock(), io::stdout().lock())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

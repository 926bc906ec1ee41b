use std::io::{BufRead, Write};

use super::compiler::{prepare_meta_command, prepare_statement, MetaCommand, Statement};
use super::error::{ExecuteError, StorageResult};
use super::table::Table;
use super::vm::{execute_statement, ExecuteOutcome};

pub const PROMPT: &str = "db > ";

/// Reads commands from `input` until `.exit` or end of input, then closes
/// the table.
///
/// Rejected commands are reported on `output` and the loop goes on. A
/// storage failure ends the loop at once and the table is not flushed.
pub fn run<R, W>(mut table: Table, mut input: R, mut output: W) -> StorageResult<()>
where
    R: BufRead,
    W: Write,
{
    let mut buffer = Vec::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        // undecodable bytes are rejected by prepare like any other bad input
        let line = String::from_utf8_lossy(&buffer);
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        if command.starts_with('.') {
            match prepare_meta_command(command) {
                Ok(MetaCommand::Exit) => break,
                Err(e) => writeln!(output, "{e}")?,
            }
            continue;
        }

        match prepare_statement(command) {
            Ok(statement) => execute(statement, &mut table, &mut output)?,
            Err(e) => writeln!(output, "{e}")?,
        }
    }
    table.close()
}

fn execute<W: Write>(statement: Statement, table: &mut Table, output: &mut W) -> StorageResult<()> {
    match execute_statement(statement, table) {
        Ok(ExecuteOutcome::Inserted) => {}
        Ok(ExecuteOutcome::Selected(rows)) => {
            for row in rows {
                writeln!(output, "{}", row?)?;
            }
        }
        Err(ExecuteError::TableFull) => {
            writeln!(output, "{}", ExecuteError::TableFull)?;
            return Ok(());
        }
        Err(ExecuteError::Storage(e)) => return Err(e),
    }
    writeln!(output, "Executed")?;
    Ok(())
}

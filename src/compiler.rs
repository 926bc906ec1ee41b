use super::error::{MetaCommandError, PrepareError};
use super::row::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

// Non-SQL commands such as .exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
}

pub fn prepare_meta_command(command: &str) -> Result<MetaCommand, MetaCommandError> {
    match command {
        ".exit" => Ok(MetaCommand::Exit),
        _ => Err(MetaCommandError::Unrecognized(command.to_owned())),
    }
}

fn prepare_insert(command: &str) -> Result<Statement, PrepareError> {
    use PrepareError::*;
    let args: Vec<_> = command.split_whitespace().skip(1).collect();
    let [id, username, email] = args[..] else {
        return Err(SyntaxError);
    };
    let id: i64 = id.parse().map_err(|_| SyntaxError)?;
    if id <= 0 {
        return Err(NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| SyntaxError)?;
    let row_to_insert = Row::new(id, username, email)?;
    Ok(Statement::Insert(row_to_insert))
}

/// Turns one command line into a statement.
///
/// The keyword is matched as a prefix of the line; anything after `select`
/// is ignored.
pub fn prepare_statement(command: &str) -> Result<Statement, PrepareError> {
    if command.starts_with("insert") {
        prepare_insert(command)
    } else if command.starts_with("select") {
        Ok(Statement::Select)
    } else {
        Err(PrepareError::UnrecognizedStatement(command.to_owned()))
    }
}

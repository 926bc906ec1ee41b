use super::compiler::Statement;
use super::cursor::Cursor;
use super::error::{ExecuteError, ExecuteResult};
use super::row::Row;
use super::table::Table;
use super::TABLE_MAX_ROWS;

pub enum ExecuteOutcome<'a> {
    Inserted,
    /// Rows of the table in insertion order, read lazily.
    Selected(Cursor<'a>),
}

pub fn execute_statement(stmt: Statement, table: &mut Table) -> ExecuteResult<ExecuteOutcome<'_>> {
    match stmt {
        Statement::Insert(row) => execute_insert(&row, table),
        Statement::Select => Ok(execute_select(table)),
    }
}

fn execute_insert<'a>(row: &Row, table: &'a mut Table) -> ExecuteResult<ExecuteOutcome<'a>> {
    if table.num_rows() >= TABLE_MAX_ROWS {
        return Err(ExecuteError::TableFull);
    }
    let mut cursor = Cursor::table_end(table);
    row.serialize(cursor.cursor_value()?);
    table.num_rows += 1;
    Ok(ExecuteOutcome::Inserted)
}

fn execute_select(table: &mut Table) -> ExecuteOutcome<'_> {
    ExecuteOutcome::Selected(Cursor::table_start(table))
}

use std::io;
use thiserror::Error;

/// Failures of the storage layer. None of these are recoverable: the
/// binary reports them and terminates.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Tried to fetch page number out of bounds: {page_num} (max: {max})")]
    PageOutOfBounds { page_num: usize, max: usize },

    #[error("Tried to flush a page that is not cached: {0}")]
    PageNotCached(usize),

    #[error("Page {page_num} was cached past the last page holding rows ({last:?})")]
    PageBeyondEnd { page_num: usize, last: Option<usize> },
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("ID must be positive")]
    NegativeId,

    #[error("String too long")]
    StringTooLong,

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaCommandError {
    #[error("Unrecognized command '{0}'")]
    Unrecognized(String),
}

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("Error: Table full.")]
    TableFull,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ExecuteResult<T> = Result<T, ExecuteError>;

pub mod compiler;
pub mod cursor;
pub mod error;
pub mod pager;
pub mod repl;
pub mod row;
pub mod table;
pub mod vm;

pub use pager::{PAGE_SIZE, TABLE_MAX_PAGES};
pub use row::{Row, EMAIL_SIZE, ID_SIZE, ROW_SIZE, USERNAME_SIZE};
pub use table::Table;

pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;

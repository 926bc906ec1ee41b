use std::iter::FusedIterator;

use super::error::StorageResult;
use super::row::Row;
use super::table::Table;

/// Position within a table.
///
/// As an iterator it yields the rows from its position to the end of the
/// table, in insertion order. It stops after the first error.
pub struct Cursor<'a> {
    table: &'a mut Table,
    row_num: usize,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub fn table_start(table: &'a mut Table) -> Self {
        let end_of_table = table.num_rows() == 0;
        Self {
            table,
            row_num: 0,
            end_of_table,
        }
    }

    pub fn table_end(table: &'a mut Table) -> Self {
        let row_num = table.num_rows();
        Self {
            table,
            row_num,
            end_of_table: true,
        }
    }

    pub fn row_num(&self) -> usize {
        self.row_num
    }

    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    pub fn cursor_value(&mut self) -> StorageResult<&mut [u8]> {
        self.table.row_slot(self.row_num)
    }

    pub fn advance(&mut self) {
        self.row_num += 1;
        if self.row_num >= self.table.num_rows() {
            self.end_of_table = true;
        }
    }
}

impl Iterator for Cursor<'_> {
    type Item = StorageResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end_of_table {
            return None;
        }
        match self.cursor_value() {
            Ok(slot) => {
                let row = Row::deserialize(slot);
                self.advance();
                Some(Ok(row))
            }
            Err(e) => {
                self.end_of_table = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.end_of_table {
            return (0, Some(0));
        }
        let left = self.table.num_rows() - self.row_num;
        (0, Some(left))
    }
}

impl FusedIterator for Cursor<'_> {}

use std::path::Path;

use super::error::{StorageError, StorageResult};
use super::pager::{Pager, PAGE_SIZE};
use super::row::ROW_SIZE;
use super::ROWS_PER_PAGE;

pub struct Table {
    pub(crate) num_rows: usize,
    pager: Pager,
}

impl Table {
    pub fn open<P>(fname: P) -> StorageResult<Self>
    where
        P: AsRef<Path>,
    {
        let pager = Pager::open(fname)?;
        let num_rows = rows_in_file(pager.file_length());
        Ok(Table { num_rows, pager })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Page number and byte offset within that page of row `row_num`.
    pub fn row_address(row_num: usize) -> (usize, usize) {
        let page_num = row_num / ROWS_PER_PAGE;
        let byte_offset = (row_num % ROWS_PER_PAGE) * ROW_SIZE;
        (page_num, byte_offset)
    }

    /// The `ROW_SIZE` bytes backing row `row_num`, loading its page if needed.
    pub fn row_slot(&mut self, row_num: usize) -> StorageResult<&mut [u8]> {
        debug_assert!(row_num <= self.num_rows);
        let (page_num, byte_offset) = Self::row_address(row_num);
        let page = self.pager.get_page(page_num)?;
        Ok(&mut page[byte_offset..byte_offset + ROW_SIZE])
    }

    /// Writes every page holding rows back to the file and closes it.
    ///
    /// Full pages are written whole; the trailing page only up to its last
    /// row. A cached page past the last row is dropped unwritten and
    /// reported once the file is closed.
    pub fn close(mut self) -> StorageResult<()> {
        let pager = &mut self.pager;
        let num_full_pages = self.num_rows / ROWS_PER_PAGE;
        for i in 0..num_full_pages {
            if pager.is_cached(i) {
                pager.flush(i, PAGE_SIZE)?;
                pager.release(i);
            }
        }

        let num_additional_rows = self.num_rows % ROWS_PER_PAGE;
        if num_additional_rows > 0 {
            let page_num = num_full_pages;
            if pager.is_cached(page_num) {
                pager.flush(page_num, num_additional_rows * ROW_SIZE)?;
                pager.release(page_num);
            }
        }

        let stray = pager.cached_pages().next();
        pager.release_all();
        self.pager.close()?;

        match stray {
            Some(page_num) => Err(StorageError::PageBeyondEnd {
                page_num,
                last: self.num_rows.checked_sub(1).map(|r| r / ROWS_PER_PAGE),
            }),
            None => Ok(()),
        }
    }
}

/// Rows stored in a file of `file_length` bytes.
///
/// Full pages always hold `ROWS_PER_PAGE` rows; the unused tail of a page is
/// not a row. A trailing partial row is ignored.
fn rows_in_file(file_length: usize) -> usize {
    let full_pages = file_length / PAGE_SIZE;
    let trailing = (file_length % PAGE_SIZE) / ROW_SIZE;
    full_pages * ROWS_PER_PAGE + trailing.min(ROWS_PER_PAGE)
}

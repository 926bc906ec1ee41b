use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

use super::error::{StorageError, StorageResult};

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;

pub type Page = [u8; PAGE_SIZE];

/// Page cache over a single database file.
///
/// Slot `i` holds page `i` of the file once it has been touched. Slots are
/// filled on demand and never evicted; writing them back is driven by the
/// owner through [`Pager::flush`].
pub struct Pager {
    file_handle: File,
    file_length: usize,
    pages: [Option<Box<Page>>; TABLE_MAX_PAGES],
}

impl Pager {
    pub fn open<P>(fname: P) -> StorageResult<Self>
    where
        P: AsRef<Path>,
    {
        let file_handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(fname)?;
        let file_length = file_handle.metadata()?.len() as usize;
        const INIT_PAGE: Option<Box<Page>> = None;
        Ok(Self {
            file_handle,
            file_length,
            pages: [INIT_PAGE; TABLE_MAX_PAGES],
        })
    }

    pub fn file_length(&self) -> usize {
        self.file_length
    }

    /// Number of pages the file holds, counting a partial trailing page.
    pub fn num_pages_on_disk(&self) -> usize {
        self.file_length.div_ceil(PAGE_SIZE)
    }

    pub fn is_cached(&self, page_num: usize) -> bool {
        matches!(self.pages.get(page_num), Some(Some(_)))
    }

    pub fn cached_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i))
    }

    pub fn get_page(&mut self, page_num: usize) -> StorageResult<&mut Page> {
        check_bounds(page_num)?;
        let page = match self.pages[page_num].take() {
            Some(page) => page,
            None => self.load_page(page_num)?,
        };
        Ok(&mut **self.pages[page_num].insert(page))
    }

    fn load_page(&mut self, page_num: usize) -> StorageResult<Box<Page>> {
        let mut page = Box::new([0u8; PAGE_SIZE]);
        if page_num < self.num_pages_on_disk() {
            let offset = page_num * PAGE_SIZE;
            // the last page on disk may be partial
            let len = (self.file_length - offset).min(PAGE_SIZE);
            self.file_handle.seek(SeekFrom::Start(offset as u64))?;
            self.file_handle.read_exact(&mut page[..len])?;
        }
        Ok(page)
    }

    /// Writes the first `size` bytes of a cached page to its place in the file.
    pub fn flush(&mut self, page_num: usize, size: usize) -> StorageResult<()> {
        check_bounds(page_num)?;
        debug_assert!(size <= PAGE_SIZE);
        let page = self.pages[page_num]
            .as_deref()
            .ok_or(StorageError::PageNotCached(page_num))?;
        let offset = page_num * PAGE_SIZE;
        self.file_handle.seek(SeekFrom::Start(offset as u64))?;
        self.file_handle.write_all(&page[..size])?;
        self.file_length = self.file_length.max(offset + size);
        Ok(())
    }

    pub fn release(&mut self, page_num: usize) {
        if let Some(slot) = self.pages.get_mut(page_num) {
            *slot = None;
        }
    }

    pub fn release_all(&mut self) {
        self.pages.iter_mut().for_each(|slot| *slot = None);
    }

    /// Syncs the file to disk and closes it.
    ///
    /// Errors surface through the sync; dropping the handle afterwards
    /// cannot report anything.
    pub fn close(self) -> StorageResult<()> {
        self.file_handle.sync_all()?;
        Ok(())
    }
}

fn check_bounds(page_num: usize) -> StorageResult<()> {
    if page_num >= TABLE_MAX_PAGES {
        return Err(StorageError::PageOutOfBounds {
            page_num,
            max: TABLE_MAX_PAGES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn open_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new.db");
        let pager = Pager::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(pager.file_length(), 0);
        assert_eq!(pager.num_pages_on_disk(), 0);
        assert_eq!(pager.cached_pages().count(), 0);
    }

    #[test]
    fn open_fails_for_unreachable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("nested.db");
        assert!(matches!(Pager::open(&path), Err(StorageError::Io(_))));
    }

    #[test]
    fn get_page_rejects_out_of_bounds_index() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("t.db")).unwrap();
        assert!(pager.get_page(TABLE_MAX_PAGES - 1).is_ok());
        assert!(matches!(
            pager.get_page(TABLE_MAX_PAGES),
            Err(StorageError::PageOutOfBounds { page_num: TABLE_MAX_PAGES, max: TABLE_MAX_PAGES })
        ));
    }

    #[test]
    fn cache_hit_returns_same_buffer() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("t.db")).unwrap();
        pager.get_page(3).unwrap()[10] = 7;
        assert_eq!(pager.get_page(3).unwrap()[10], 7);
        assert_eq!(pager.cached_pages().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn cache_miss_loads_full_and_partial_pages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.db");
        let mut bytes = vec![1u8; PAGE_SIZE];
        bytes.extend(std::iter::repeat(2u8).take(100));
        fs::write(&path, &bytes).unwrap();

        let mut pager = Pager::open(&path).unwrap();
        assert_eq!(pager.num_pages_on_disk(), 2);
        assert!(pager.get_page(0).unwrap().iter().all(|&b| b == 1));
        let partial = pager.get_page(1).unwrap();
        assert!(partial[..100].iter().all(|&b| b == 2));
        assert!(partial[100..].iter().all(|&b| b == 0));
        assert!(pager.get_page(2).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn flush_writes_exactly_size_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.db");
        let mut pager = Pager::open(&path).unwrap();
        pager.get_page(0).unwrap().fill(9);
        pager.get_page(1).unwrap()[..5].copy_from_slice(b"hello");
        pager.flush(0, PAGE_SIZE).unwrap();
        pager.flush(1, 5).unwrap();
        assert_eq!(pager.file_length(), PAGE_SIZE + 5);
        pager.close().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), PAGE_SIZE + 5);
        assert!(bytes[..PAGE_SIZE].iter().all(|&b| b == 9));
        assert_eq!(&bytes[PAGE_SIZE..], b"hello");
    }

    #[test]
    fn flush_of_empty_slot_fails() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("t.db")).unwrap();
        assert!(matches!(pager.flush(0, PAGE_SIZE), Err(StorageError::PageNotCached(0))));
    }

    #[test]
    fn release_empties_slots() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("t.db")).unwrap();
        pager.get_page(0).unwrap();
        pager.get_page(4).unwrap();
        pager.release(0);
        assert!(!pager.is_cached(0));
        assert!(pager.is_cached(4));
        pager.release_all();
        assert_eq!(pager.cached_pages().count(), 0);
    }
}

//! Paged row cache implementing the `RowSource` contract.
//!
//! ## Behavior
//!
//! - **Poll on render**: `get_row` never blocks. A miss queues the page and
//!   answers "not loaded"; the host calls `resolve_pending` when it is ready
//!   to fetch, and the next render finds the rows.
//! - **Page caching**: recently used pages are kept, least recently used
//!   pages are evicted past `max_pages`.
//! - **Optimistic edits**: an edit is applied to the cached row at once and
//!   queued for persistence (`take_edits`).
//! - **Delta invalidation**: a changed delta version drops every cached page.

use crate::constants::{MAX_CACHED_PAGES, PAGE_SIZE};
use crate::data::error::{DataError, DataResult};
use crate::data::source::{PageFetcher, RowSource};
use crate::types::{CellValue, Row};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

/// A committed edit waiting to be persisted
#[derive(Clone, Debug, PartialEq)]
pub struct CellEdit {
    pub row_index: usize,
    pub column_key: String,
    pub new_value: String,
}

/// A cached page of rows
struct CachedPage {
    rows: Vec<Row>,
    /// Access tick (for LRU eviction)
    last_access: u64,
}

pub struct PagedRowCache<F> {
    fetcher: F,
    page_size: usize,
    max_pages: usize,
    delta_id: Mutex<Option<u64>>,
    pages: RwLock<HashMap<usize, CachedPage>>,
    pending: Mutex<BTreeSet<usize>>,
    edits: Mutex<Vec<CellEdit>>,
    access_tick: AtomicU64,
}

impl<F: PageFetcher> PagedRowCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_page_size(fetcher, PAGE_SIZE, MAX_CACHED_PAGES)
    }

    pub fn with_page_size(fetcher: F, page_size: usize, max_pages: usize) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
            delta_id: Mutex::new(None),
            pages: RwLock::new(HashMap::new()),
            pending: Mutex::new(BTreeSet::new()),
            edits: Mutex::new(Vec::new()),
            access_tick: AtomicU64::new(0),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn next_tick(&self) -> u64 {
        self.access_tick.fetch_add(1, Ordering::Relaxed)
    }

    fn page_of(&self, index: usize) -> usize {
        index / self.page_size
    }

    /// Whether `index` is served from cache right now
    pub fn is_loaded(&self, index: usize) -> bool {
        self.pages.read().contains_key(&self.page_of(index))
    }

    /// Pages queued by cache misses, in ascending order
    pub fn pending_pages(&self) -> Vec<usize> {
        self.pending.lock().iter().copied().collect()
    }

    pub fn cached_page_count(&self) -> usize {
        self.pages.read().len()
    }

    /// Fetch every queued page. Returns the number of pages loaded.
    ///
    /// On a fetch error the failed page and everything after it stay queued.
    pub fn resolve_pending(&self) -> DataResult<usize> {
        let queued: Vec<usize> = std::mem::take(&mut *self.pending.lock())
            .into_iter()
            .collect();
        let total_rows = self.fetcher.total_rows();
        let mut loaded = 0;

        for (i, &page) in queued.iter().enumerate() {
            let start = page * self.page_size;
            let result = if start >= total_rows {
                Err(DataError::PageOutOfRange { page, total_rows })
            } else {
                let count = self.page_size.min(total_rows - start);
                self.fetcher.fetch_rows(start, count)
            };

            match result {
                Ok(rows) => {
                    self.insert_page(page, rows);
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch page {}: {}", page, e);
                    self.pending.lock().extend(queued[i..].iter().copied());
                    return Err(e);
                }
            }
        }

        if loaded > 0 {
            tracing::debug!(pages = loaded, "Resolved pending pages");
        }
        Ok(loaded)
    }

    fn insert_page(&self, page: usize, rows: Vec<Row>) {
        let mut pages = self.pages.write();

        if pages.len() >= self.max_pages && !pages.contains_key(&page) {
            if let Some(oldest) = pages
                .iter()
                .min_by_key(|(_, p)| p.last_access)
                .map(|(idx, _)| *idx)
            {
                pages.remove(&oldest);
            }
        }

        pages.insert(
            page,
            CachedPage {
                rows,
                last_access: self.next_tick(),
            },
        );
    }

    /// Record the upstream delta version. A changed version means cached
    /// rows are stale: every page is dropped and will be re-fetched on
    /// demand. Returns true if the cache was invalidated.
    pub fn set_delta_id(&self, delta_id: Option<u64>) -> bool {
        let mut current = self.delta_id.lock();
        if *current == delta_id {
            return false;
        }
        *current = delta_id;
        self.clear();
        tracing::debug!(?delta_id, "Delta changed, row cache cleared");
        true
    }

    /// Drop every cached and queued page
    pub fn clear(&self) {
        self.pages.write().clear();
        self.pending.lock().clear();
    }

    /// Drain edits waiting to be persisted
    pub fn take_edits(&self) -> Vec<CellEdit> {
        std::mem::take(&mut *self.edits.lock())
    }
}

impl<F: PageFetcher> RowSource for PagedRowCache<F> {
    fn total_rows(&self) -> usize {
        self.fetcher.total_rows()
    }

    fn get_row(&self, index: usize) -> Option<Row> {
        if index >= self.fetcher.total_rows() {
            return None;
        }
        let page = self.page_of(index);

        {
            let mut pages = self.pages.write();
            if let Some(cached) = pages.get_mut(&page) {
                cached.last_access = self.next_tick();
                return cached.rows.get(index % self.page_size).cloned();
            }
        }

        self.pending.lock().insert(page);
        None
    }

    fn edit_cell(&self, row_index: usize, column_key: &str, new_value: String) {
        let page = self.page_of(row_index);
        if let Some(cached) = self.pages.write().get_mut(&page) {
            if let Some(row) = cached.rows.get_mut(row_index % self.page_size) {
                row.insert(column_key, CellValue::Text(new_value.clone()));
            }
        }

        self.edits.lock().push(CellEdit {
            row_index,
            column_key: column_key.to_string(),
            new_value,
        });
    }
}

/// Format row count for display (e.g., "1.2M rows")
pub fn format_row_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M rows", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K rows", count as f64 / 1_000.0)
    } else if count == 1 {
        "1 row".to_string()
    } else {
        format!("{} rows", count)
    }
}

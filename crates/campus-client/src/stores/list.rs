//! Generic paginated list state.
//!
//! A fetch that has been superseded by a newer one is discarded when it
//! completes, whether it succeeded or failed. The loading flag follows the
//! latest fetch only.

use crate::error::Result;
use campus_http::{ListShape, Normalized};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            loading: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub page: u32,
    pub page_size: u32,
    /// Sent as `post_type`.
    pub direction: Option<String>,
    pub search: Option<String>,
    /// Extra filters, sent verbatim.
    pub filters: Vec<(String, String)>,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            direction: None,
            search: None,
            filters: Vec::new(),
        }
    }
}

impl FetchParams {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Pagination always; the rest only when set to something meaningful.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];
        if let Some(direction) = self.direction.as_deref().filter(|d| is_set(d)) {
            pairs.push(("post_type".to_string(), direction.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        for (key, value) in &self.filters {
            if is_set(value) {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }
}

fn is_set(value: &str) -> bool {
    !value.is_empty() && value != ALL
}

pub struct ListStore<T> {
    name: &'static str,
    state: RwLock<ListState<T>>,
    seq: AtomicU64,
}

impl<T> ListStore<T>
where
    T: DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(ListState::default()),
            seq: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.state.read().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Runs `call` with the query built from `params` and applies the result.
    /// Failures reset the list to empty and are not returned.
    ///
    /// Returns `true` only when this fetch succeeded and its page was applied.
    pub async fn fetch_with<F, Fut>(&self, params: &FetchParams, call: F) -> bool
    where
        F: FnOnce(Vec<(String, String)>) -> Fut,
        Fut: Future<Output = Result<Normalized>>,
    {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::start(&self.state, &self.seq, seq);

        let outcome: Result<ListShape<T>> = match call(params.query_pairs()).await {
            Ok(normalized) => ListShape::<T>::from_normalized(normalized).map_err(Into::into),
            Err(e) => Err(e),
        };

        let mut state = self.state.write();
        if self.seq.load(Ordering::SeqCst) != seq {
            debug!("[{}] discarding superseded fetch #{}", self.name, seq);
            return false;
        }
        match outcome {
            Ok(shape) => {
                let page = shape.resolve(params.page, params.page_size);
                debug!(
                    "[{}] fetched {} of {} items (page {}/{})",
                    self.name,
                    page.items.len(),
                    page.total,
                    page.page,
                    page.total_pages
                );
                state.items = page.items;
                state.total = page.total;
                state.page = page.page;
                state.page_size = page.page_size;
                state.total_pages = page.total_pages;
                true
            }
            Err(e) => {
                warn!("[{}] fetch failed: {}", self.name, e);
                state.items.clear();
                state.total = 0;
                state.total_pages = 0;
                false
            }
        }
    }
}

/// Sets `loading` for the duration of a fetch; only the latest fetch clears it.
struct LoadingGuard<'a, T> {
    state: &'a RwLock<ListState<T>>,
    latest: &'a AtomicU64,
    seq: u64,
}

impl<'a, T> LoadingGuard<'a, T> {
    fn start(state: &'a RwLock<ListState<T>>, latest: &'a AtomicU64, seq: u64) -> Self {
        state.write().loading = true;
        Self { state, latest, seq }
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        if self.latest.load(Ordering::SeqCst) == self.seq {
            state.loading = false;
        }
    }
}

use crate::api::{self, ApiClient};
use crate::models::ProjectSummary;
use crate::stores::list::{FetchParams, ListState, ListStore, ALL};
use parking_lot::RwLock;

/// Project listing with a remembered direction filter.
pub struct ProjectStore {
    list: ListStore<ProjectSummary>,
    current_direction: RwLock<String>,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore {
    pub fn new() -> Self {
        Self {
            list: ListStore::new("ProjectStore"),
            current_direction: RwLock::new(ALL.to_string()),
        }
    }

    /// Fetches a page of projects. A non-empty `params.direction` becomes the
    /// current direction once the fetch succeeds; leaving it out keeps the
    /// previous one.
    pub async fn fetch(&self, api: &ApiClient, params: FetchParams) {
        let applied = self
            .list
            .fetch_with(&params, |query| api::project::list(api, query))
            .await;
        if !applied {
            return;
        }
        if let Some(direction) = params.direction.filter(|d| !d.is_empty()) {
            *self.current_direction.write() = direction;
        }
    }

    pub fn current_direction(&self) -> String {
        self.current_direction.read().clone()
    }

    pub fn snapshot(&self) -> ListState<ProjectSummary> {
        self.list.snapshot()
    }

    pub fn projects(&self) -> Vec<ProjectSummary> {
        self.list.items()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }
}

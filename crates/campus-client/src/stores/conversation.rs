use crate::api::{self, ApiClient};
use crate::models::Conversation;
use crate::stores::list::{FetchParams, ListState, ListStore};

pub struct ConversationStore {
    list: ListStore<Conversation>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            list: ListStore::new("ConversationStore"),
        }
    }

    pub async fn fetch(&self, api: &ApiClient, params: FetchParams) {
        self.list
            .fetch_with(&params, |query| api::conversation::list(api, query))
            .await;
    }

    pub fn snapshot(&self) -> ListState<Conversation> {
        self.list.snapshot()
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.list.items()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }
}

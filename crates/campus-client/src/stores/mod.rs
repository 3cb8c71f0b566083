//! Client-side list stores.

pub mod conversation;
pub mod list;
pub mod project;

pub use conversation::ConversationStore;
pub use list::{FetchParams, ListState, ListStore, ALL};
pub use project::ProjectStore;

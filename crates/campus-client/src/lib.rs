//! Client for the campus collaboration platform.
//!
//! [`AppContext`] wires the pieces together: a [`SessionStore`] holding the
//! signed-in user, the [`ApiClient`] interceptor every endpoint wrapper in
//! [`api`] goes through, list stores for projects and conversations, and a
//! [`RouteGuard`] deciding which routes need a session.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod notify;
pub mod router;
pub mod session;
pub mod stores;

pub use api::ApiClient;
pub use config::{ClientConfig, Endpoints};
pub use context::AppContext;
pub use error::{Error, Result};
pub use notify::{BroadcastNotifier, Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use router::{Location, Navigation, Route, RouteGuard, RouteTable};
pub use session::{SessionState, SessionStore};
pub use stores::{ConversationStore, FetchParams, ListState, ProjectStore};

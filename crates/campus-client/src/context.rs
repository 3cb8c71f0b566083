//! Application-scoped state.
//!
//! One [`AppContext`] owns the session, the interceptor and the stores for
//! the lifetime of the application. Nothing here is global.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{LoginCredentials, LoginResponse, RegisterDetails, RegisterResponse};
use crate::notify::{Notifier, TracingNotifier};
use crate::router::{Navigation, RouteGuard};
use crate::session::SessionStore;
use crate::stores::{ConversationStore, FetchParams, ProjectStore};
use campus_common::{DurableStorage, FileStorage};
use campus_http::{ApiNetwork, HttpClient};
use std::sync::Arc;
use tracing::info;

pub struct AppContext {
    config: ClientConfig,
    notifier: Arc<dyn Notifier>,
    session: Arc<SessionStore>,
    api: ApiClient,
    projects: ProjectStore,
    conversations: ConversationStore,
    guard: RouteGuard,
}

impl AppContext {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn DurableStorage>,
        http: HttpClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(storage, notifier.clone()));
        let api = ApiClient::new(
            http,
            session.clone(),
            notifier.clone(),
            config.endpoints.clone(),
        );
        Self {
            config,
            notifier,
            session,
            api,
            projects: ProjectStore::new(),
            conversations: ConversationStore::new(),
            guard: RouteGuard::default(),
        }
    }

    /// Real network, file-backed storage, log notifications.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let storage = Arc::new(FileStorage::open(&config.storage_path)?);
        let http = HttpClient::with_config(config.http_config())?;
        Ok(Self::new(config, storage, http, Arc::new(TracingNotifier)))
    }

    /// Same as [`new`](Self::new) over a caller-supplied network.
    pub fn with_network(
        config: ClientConfig,
        storage: Arc<dyn DurableStorage>,
        network: Arc<dyn ApiNetwork>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let http = HttpClient::with_network(network, config.http_config());
        Self::new(config, storage, http, notifier)
    }

    /// Restores a previous session, if any.
    pub fn cold_start(&self) {
        self.session.init();
        info!(
            "[App] started against {} (logged in: {})",
            self.config.base_url,
            self.session.is_logged_in()
        );
    }

    /// Ends the session.
    pub fn teardown(&self) {
        self.session.logout();
    }

    pub async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse> {
        self.session.login(&self.api, credentials).await
    }

    pub async fn register(&self, details: RegisterDetails) -> Result<RegisterResponse> {
        self.session.register(&self.api, details).await
    }

    pub fn navigate(&self, target: &str) -> Navigation {
        self.guard.before_each(&self.session, target)
    }

    pub async fn fetch_projects(&self, params: FetchParams) {
        self.projects.fetch(&self.api, params).await
    }

    pub async fn fetch_conversations(&self, params: FetchParams) {
        self.conversations.fetch(&self.api, params).await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}

//! Signed-in user session.
//!
//! The token and profile live in memory behind a lock and are mirrored to
//! durable storage under the `token` and `userInfo` keys, so a restarted
//! process can pick the session up again through [`SessionStore::init`].

use crate::api::{self, ApiClient};
use crate::error::{Error, Result};
use crate::models::{
    LoginCredentials, LoginResponse, ProfileUpdate, RegisterDetails, RegisterResponse, Role,
    UserProfile,
};
use crate::notify::Notifier;
use campus_common::DurableStorage;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: String,
    pub user: Option<UserProfile>,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }
}

pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn DurableStorage>,
    notifier: Arc<dyn Notifier>,
    restored: AtomicBool,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn DurableStorage>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
            notifier,
            restored: AtomicBool::new(false),
        }
    }

    pub async fn login(
        &self,
        api: &ApiClient,
        credentials: LoginCredentials,
    ) -> Result<LoginResponse> {
        let response = match api::auth::login(api, &credentials).await {
            Ok(response) => response,
            Err(e) => {
                self.notifier.error("Login failed");
                return Err(e);
            }
        };

        let profile = UserProfile {
            id: response.user_id,
            role: response.identity,
            account: credentials.account,
            display_name: response.name.clone(),
            token: Some(response.token.clone()),
        };

        if let Err(e) = self.persist(&response.token, &profile) {
            self.notifier.error("Login failed");
            return Err(e);
        }
        *self.state.write() = SessionState {
            token: response.token.clone(),
            user: Some(profile.clone()),
        };

        info!("[Session] {} logged in as {}", profile.account, profile.role);
        self.notifier.success("Logged in");
        Ok(response)
    }

    /// Registers an account. The session gets a provisional profile but no
    /// token; the user still has to log in.
    pub async fn register(
        &self,
        api: &ApiClient,
        details: RegisterDetails,
    ) -> Result<RegisterResponse> {
        let response = match api::auth::register(api, &details).await {
            Ok(response) => response,
            Err(e) => {
                self.notifier.error("Registration failed");
                return Err(e);
            }
        };

        self.state.write().user = Some(UserProfile {
            id: response.user_id,
            role: response.identity,
            account: details.account,
            display_name: details.name,
            token: None,
        });

        info!("[Session] registered user {}", response.user_id);
        self.notifier.success("Registered, please log in");
        Ok(response)
    }

    /// Fetches the profile from the backend and refreshes the stored copy.
    pub async fn profile(&self, api: &ApiClient) -> Result<UserProfile> {
        let fetched = api::auth::profile(api).await?;
        self.refresh_profile(fetched)
    }

    pub async fn update_profile(&self, api: &ApiClient, update: ProfileUpdate) -> Result<UserProfile> {
        let updated = api::auth::update_profile(api, &update).await?;
        self.refresh_profile(updated)
    }

    /// Clears the session in memory and in storage. Safe to call repeatedly.
    pub fn logout(&self) {
        *self.state.write() = SessionState::default();
        for key in [TOKEN_KEY, USER_INFO_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("[Session] failed to remove '{}' from storage: {}", key, e);
            }
        }
        info!("[Session] logged out");
        self.notifier.success("Logged out");
    }

    /// Restores the session from storage when both token and profile exist.
    pub fn init(&self) {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user_info = self.storage.get(USER_INFO_KEY);

        if let (Some(token), Some(raw)) = (token, user_info) {
            match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => {
                    debug!("[Session] restored session for user {}", user.id);
                    *self.state.write() = SessionState {
                        token,
                        user: Some(user),
                    };
                }
                Err(e) => warn!("[Session] discarding unreadable userInfo: {}", e),
            }
        }
        self.restored.store(true, Ordering::SeqCst);
    }

    /// Whether [`init`](Self::init) has run.
    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().is_logged_in()
    }

    pub fn is_teacher(&self) -> bool {
        self.role() == Some(Role::Teacher)
    }

    pub fn is_student(&self) -> bool {
        self.role() == Some(Role::Student)
    }

    pub fn token(&self) -> Option<String> {
        let state = self.state.read();
        state.is_logged_in().then(|| state.token.clone())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    fn role(&self) -> Option<Role> {
        self.state.read().user.as_ref().map(|u| u.role)
    }

    /// Writes both keys or neither.
    fn persist(&self, token: &str, profile: &UserProfile) -> Result<()> {
        let user_info = serde_json::to_string(profile)?;
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.set(USER_INFO_KEY, &user_info) {
            if let Err(rollback) = self.storage.remove(TOKEN_KEY) {
                warn!("[Session] failed to roll back '{}': {}", TOKEN_KEY, rollback);
            }
            return Err(e.into());
        }
        Ok(())
    }

    // The profile endpoint does not echo the account or token.
    fn refresh_profile(&self, mut fetched: UserProfile) -> Result<UserProfile> {
        let token = {
            let state = self.state.read();
            if !state.is_logged_in() {
                return Err(Error::NotLoggedIn);
            }
            if let Some(current) = &state.user {
                if fetched.account.is_empty() {
                    fetched.account = current.account.clone();
                }
            }
            state.token.clone()
        };
        fetched.token = Some(token.clone());

        self.persist(&token, &fetched)?;
        let mut state = self.state.write();
        if state.token == token {
            state.user = Some(fetched.clone());
        }
        Ok(fetched)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionStore")
            .field("logged_in", &state.is_logged_in())
            .field("user", &state.user.as_ref().map(|u| u.id))
            .field("restored", &self.is_restored())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use campus_common::MemoryStorage;

    fn store_with(storage: Arc<MemoryStorage>) -> SessionStore {
        SessionStore::new(storage, Arc::new(RecordingNotifier::new()))
    }

    #[test]
    fn test_init_without_token_stays_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(USER_INFO_KEY, r#"{"user_id":1,"identity":1}"#)
            .unwrap();
        let store = store_with(storage);

        store.init();
        assert!(store.is_restored());
        assert!(!store.is_logged_in());
        assert!(store.user().is_none());
        assert!(!store.is_teacher() && !store.is_student());
    }

    #[test]
    fn test_init_restores_both_fields() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok-1").unwrap();
        storage
            .set(
                USER_INFO_KEY,
                r#"{"user_id":7,"identity":1,"account":"t01","name":"Prof. Wang","token":"tok-1"}"#,
            )
            .unwrap();
        let store = store_with(storage);

        store.init();
        assert!(store.is_logged_in());
        assert!(store.is_teacher());
        assert!(!store.is_student());
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.user().unwrap().display_name, "Prof. Wang");
    }

    #[test]
    fn test_init_discards_corrupt_profile() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok-1").unwrap();
        storage.set(USER_INFO_KEY, "{not json").unwrap();
        let store = store_with(storage);

        store.init();
        assert!(store.is_restored());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok-1").unwrap();
        storage
            .set(USER_INFO_KEY, r#"{"user_id":2,"identity":0}"#)
            .unwrap();
        let store = store_with(storage.clone());
        store.init();
        assert!(store.is_logged_in());

        store.logout();
        store.logout();
        assert!(!store.is_logged_in());
        assert!(store.token().is_none());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_INFO_KEY).is_none());
    }
}

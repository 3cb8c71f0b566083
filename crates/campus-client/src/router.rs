//! Route table and navigation guard.
//!
//! Views are not rendered here; a route is only its path, its name and
//! whether it needs a signed-in user.

use crate::session::SessionStore;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use tracing::debug;

/// Query-value encoding that keeps `/` readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const REDIRECT_KEY: &str = "redirect";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

impl Route {
    pub const fn new(path: &'static str, name: &'static str, requires_auth: bool) -> Self {
        Self {
            path,
            name,
            requires_auth,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            Route::new("/login", "Login", false),
            Route::new("/register", "Register", false),
            Route::new("/", "Home", true),
            Route::new("/projects", "ProjectList", true),
            Route::new("/publish", "ProjectPublish", true),
            Route::new("/profile", "Profile", true),
            Route::new("/cooperation", "Cooperation", true),
            Route::new("/message", "Message", true),
        ])
    }
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

/// A navigation target: path plus decoded query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Splits `path?query`. Query pairs are taken verbatim.
    pub fn parse(full_path: &str) -> Self {
        let (path, query) = match full_path.split_once('?') {
            Some((path, query)) => (path, query),
            None => (full_path, ""),
        };
        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self {
            path: if path.is_empty() { HOME_PATH.to_string() } else { path.to_string() },
            query,
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{}{}={}",
                sep,
                utf8_percent_encode(key, QUERY_VALUE),
                utf8_percent_encode(value, QUERY_VALUE)
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(Location),
}

#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decides whether navigation to `target` (a full path) may proceed.
    pub fn before_each(&self, session: &SessionStore, target: &str) -> Navigation {
        if !session.is_restored() {
            session.init();
        }

        let location = Location::parse(target);
        let route = self.table.find(&location.path);
        let requires_auth = route.is_some_and(|r| r.requires_auth);
        let logged_in = session.is_logged_in();

        let decision = if requires_auth && !logged_in {
            Navigation::Redirect(Location::new(LOGIN_PATH).with_query(REDIRECT_KEY, target))
        } else if route.is_some_and(|r| r.path == LOGIN_PATH) && logged_in {
            Navigation::Redirect(Location::new(HOME_PATH))
        } else {
            Navigation::Proceed
        };

        debug!("[Router] {} -> {:?}", target, decision);
        decision
    }
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::session::{TOKEN_KEY, USER_INFO_KEY};
    use campus_common::{DurableStorage, MemoryStorage};
    use std::sync::Arc;

    fn anonymous() -> SessionStore {
        SessionStore::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingNotifier::new()),
        )
    }

    fn signed_in() -> SessionStore {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage
            .set(USER_INFO_KEY, r#"{"user_id":3,"identity":0}"#)
            .unwrap();
        SessionStore::new(storage, Arc::new(RecordingNotifier::new()))
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        let guard = RouteGuard::default();
        let session = anonymous();

        let nav = guard.before_each(&session, "/profile");
        let Navigation::Redirect(location) = nav else {
            panic!("expected redirect");
        };
        assert_eq!(location.to_string(), "/login?redirect=/profile");
        assert_eq!(location.query_value("redirect"), Some("/profile"));
        assert!(session.is_restored());
    }

    #[test]
    fn test_redirect_keeps_full_path() {
        let guard = RouteGuard::default();
        let nav = guard.before_each(&anonymous(), "/projects?post_type=research");
        assert_eq!(
            nav,
            Navigation::Redirect(
                Location::new("/login").with_query("redirect", "/projects?post_type=research")
            )
        );
        if let Navigation::Redirect(location) = nav {
            assert_eq!(
                location.to_string(),
                "/login?redirect=/projects%3Fpost_type%3Dresearch"
            );
        }
    }

    #[test]
    fn test_signed_in_user_skips_login() {
        let guard = RouteGuard::default();
        let session = signed_in();
        assert_eq!(
            guard.before_each(&session, "/login"),
            Navigation::Redirect(Location::new("/"))
        );
        assert_eq!(guard.before_each(&session, "/message"), Navigation::Proceed);
    }

    #[test]
    fn test_public_and_unknown_routes_proceed() {
        let guard = RouteGuard::default();
        let session = anonymous();
        assert_eq!(guard.before_each(&session, "/register"), Navigation::Proceed);
        assert_eq!(guard.before_each(&session, "/login"), Navigation::Proceed);
        assert_eq!(guard.before_each(&session, "/nowhere"), Navigation::Proceed);
    }

    #[test]
    fn test_route_lookup_ignores_trailing_slash() {
        let table = RouteTable::default();
        assert_eq!(table.find("/projects/").map(|r| r.name), Some("ProjectList"));
        assert_eq!(table.find("").map(|r| r.name), Some("Home"));
    }
}

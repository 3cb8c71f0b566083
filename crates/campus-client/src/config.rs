//! Client configuration
//!
//! Layered as: defaults, then the optional JSON file at
//! `campus_common::config_path()`, then environment variables.

use campus_http::HttpConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Endpoint paths relative to the base URL. `{id}` is substituted per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub login: String,
    pub register: String,
    pub profile: String,

    pub conversation_create: String,
    pub conversation_list: String,
    pub message_send: String,
    pub message_list: String,
    pub conversation_close: String,
    pub auto_reply_settings: String,

    pub cooperation_apply_and_invite: String,
    pub cooperation_confirm: String,
    pub cooperation_reject: String,
    pub cooperation_cancel: String,
    pub cooperation_list: String,
    pub cooperation_check_unfinished: String,

    pub post_like: String,
    pub post_favorite: String,
    pub post_comment: String,
    pub post_comments: String,

    pub project_list: String,
    pub project_detail: String,
    pub publish_research: String,
    pub publish_competition: String,
    pub publish_personal: String,
    pub project_stats: String,
    pub file_download: String,
    pub attachment_upload: String,

    pub tags: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login".into(),
            register: "/auth/register".into(),
            profile: "/auth/profile".into(),

            conversation_create: "/conversations/post".into(),
            conversation_list: "/conversations/lists".into(),
            message_send: "/conversations/{id}/messages".into(),
            message_list: "/conversations/{id}/messages/lists".into(),
            conversation_close: "/conversations/{id}/close".into(),
            auto_reply_settings: "/conversations/auto_reply/settings".into(),

            cooperation_apply_and_invite: "/cooperation/apply_and_invite".into(),
            cooperation_confirm: "/cooperations/{id}/confirm".into(),
            cooperation_reject: "/cooperations/{id}/reject".into(),
            cooperation_cancel: "/cooperations/{id}/cancel".into(),
            cooperation_list: "/cooperations".into(),
            cooperation_check_unfinished: "/cooperations/check-unfinished".into(),

            post_like: "/post/like".into(),
            post_favorite: "/post/favorite".into(),
            post_comment: "/post/comment".into(),
            post_comments: "/post/{id}/comments".into(),

            project_list: "/project/list".into(),
            project_detail: "/project/detail/{id}".into(),
            publish_research: "/publish/research".into(),
            publish_competition: "/publish/competition".into(),
            publish_personal: "/publish/personal".into(),
            project_stats: "/project/stats".into(),
            file_download: "/files/download".into(),
            attachment_upload: "/attachments/upload".into(),

            tags: "/tags/".into(),
        }
    }
}

/// Substitutes `{id}` in an endpoint template.
pub fn fill(template: &str, id: impl std::fmt::Display) -> String {
    template.replace("{id}", &id.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
    pub enable_logging: bool,
    /// Durable storage file.
    pub storage_path: PathBuf,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let http = HttpConfig::default();
        Self {
            base_url: http.base_url,
            timeout_ms: http.request_timeout_ms,
            user_agent: None,
            enable_logging: true,
            storage_path: campus_common::storage_path(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by the config file, overridden by the environment.
    pub fn load() -> Self {
        let mut config = campus_common::config_path()
            .and_then(|path| campus_common::load_json_file::<ClientConfig>(&path))
            .unwrap_or_default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Writes this config to `campus_common::config_path()`.
    pub fn save(&self) -> crate::Result<std::path::PathBuf> {
        let path = campus_common::config_path()
            .ok_or_else(|| crate::Error::Config("no config directory on this platform".into()))?;
        campus_common::save_json_file(&path, self)?;
        Ok(path)
    }

    /// Applies `CAMPUS_API_URL`, `CAMPUS_TIMEOUT_MS` and `CAMPUS_STORAGE`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CAMPUS_API_URL") {
            self.base_url = url;
        }
        if let Some(raw) = lookup("CAMPUS_TIMEOUT_MS") {
            match raw.parse() {
                Ok(ms) => self.timeout_ms = ms,
                Err(_) => warn!("Ignoring invalid CAMPUS_TIMEOUT_MS={:?}", raw),
            }
        }
        if let Some(path) = lookup("CAMPUS_STORAGE") {
            self.storage_path = PathBuf::from(path);
        }
    }

    pub fn http_config(&self) -> HttpConfig {
        let mut http = HttpConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.timeout_ms,
            enable_logging: self.enable_logging,
            ..HttpConfig::default()
        };
        if let Some(agent) = &self.user_agent {
            http.user_agent = agent.clone();
        }
        http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.endpoints.login, "/auth/login");
        assert!(config.storage_path.ends_with("storage.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"base_url": "https://campus.example.edu/api", "endpoints": {"tags": "/tag/list"}}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://campus.example.edu/api");
        assert_eq!(config.endpoints.tags, "/tag/list");
        assert_eq!(config.endpoints.project_list, "/project/list");
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CAMPUS_API_URL", "http://10.1.1.1/api"),
            ("CAMPUS_TIMEOUT_MS", "not-a-number"),
            ("CAMPUS_STORAGE", "/tmp/campus.json"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://10.1.1.1/api");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.storage_path, PathBuf::from("/tmp/campus.json"));
    }

    #[test]
    fn test_fill_template() {
        let endpoints = Endpoints::default();
        assert_eq!(
            fill(&endpoints.message_send, 12),
            "/conversations/12/messages"
        );
        assert_eq!(fill(&endpoints.tags, 12), "/tags/");
    }

    #[test]
    fn test_http_config_carries_overrides() {
        let config = ClientConfig {
            timeout_ms: 2_500,
            user_agent: Some("campus-cli/test".to_string()),
            ..ClientConfig::default()
        };
        let http = config.http_config();
        assert_eq!(http.request_timeout_ms, 2_500);
        assert_eq!(http.user_agent, "campus-cli/test");
        assert_eq!(
            http.default_headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }
}

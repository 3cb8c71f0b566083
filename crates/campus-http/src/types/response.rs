//! Raw HTTP response as seen by the normalizer.

use bytes::Bytes;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        ApiResponse {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// JSON response with the given status.
    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string()).with_header("content-type", "application/json")
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body as JSON; an empty body is `None`.
    pub fn body_json(&self) -> Option<serde_json::Result<Value>> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        Some(serde_json::from_slice(&self.body))
    }

    pub fn reason(&self) -> String {
        http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Default for ApiResponse {
    fn default() -> Self {
        ApiResponse {
            status: 200,
            headers: BTreeMap::new(),
            body: Bytes::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_response_basic() {
        let res = ApiResponse::json(200, &json!({"code": 200})).with_header("X-Trace", "abc");
        assert_eq!(res.header("x-trace"), Some("abc"));
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        assert!(res.is_success());
        assert_eq!(res.body_json().unwrap().unwrap()["code"], 200);
    }

    #[test]
    fn test_empty_body_has_no_json() {
        let res = ApiResponse::new(204, "  ");
        assert!(res.body_json().is_none());
        assert_eq!(res.reason(), "No Content");
        assert_eq!(ApiResponse::new(599, "").reason(), "HTTP 599");
    }
}

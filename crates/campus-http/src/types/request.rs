//! Outgoing API request description.

use bytes::Bytes;
use serde_json::Value;
use std::collections::BTreeMap;

/// One part of a multipart form.
#[derive(Clone, Debug, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        data: Bytes,
    },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormField::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

/// Request relative to the configured base URL.
#[derive(Clone, Debug, Default)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<String>,
    pub extra_headers: BTreeMap<String, String>,
}

impl ApiRequest {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).with_method("POST")
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(path).with_method("PATCH")
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path).with_method("DELETE")
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn with_json(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn with_multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn has_body(&self) -> bool {
        !matches!(self.body, RequestBody::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_request_builder() {
        let req = ApiRequest::post("/auth/login")
            .with_json(json!({"account": "20210001"}))
            .with_query("page", "1")
            .with_bearer("tok");

        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/auth/login");
        assert_eq!(req.query_value("page"), Some("1"));
        assert_eq!(req.bearer.as_deref(), Some("tok"));
        assert!(req.has_body());
    }

    #[test]
    fn test_default_is_bodyless_get() {
        let req = ApiRequest::get("/tags/");
        assert_eq!(req.method, "GET");
        assert!(!req.has_body());
        assert!(req.query_value("page").is_none());
    }
}

use crate::client::config::HttpConfig;
use crate::error::{ApiError, Result};
use crate::traits::ApiNetwork;
use crate::types::{ApiRequest, ApiResponse, FormField, RequestBody};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// reqwest-backed network.
pub struct NativeNetwork {
    client: Client,
    base_url: String,
}

impl NativeNetwork {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (k, v) in &config.default_headers {
            let name =
                HeaderName::from_bytes(k.as_bytes()).map_err(|e| ApiError::Config(e.to_string()))?;
            let value = HeaderValue::from_str(v).map_err(|e| ApiError::Config(e.to_string()))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        // Validate once so a bad base URL fails at construction.
        Url::parse(&config.base_url)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

/// Joins `path` onto `base`; absolute URLs are taken as-is.
pub fn resolve_url(base: &str, path: &str, query: &[(String, String)]) -> Result<Url> {
    let joined = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.is_empty() {
        base.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    let mut url = Url::parse(&joined)?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

fn build_form(fields: Vec<FormField>) -> Result<Form> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let mut part = Part::bytes(data.to_vec()).file_name(file_name);
                if let Some(ct) = content_type {
                    part = part
                        .mime_str(&ct)
                        .map_err(|e| ApiError::Config(e.to_string()))?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl ApiNetwork for NativeNetwork {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = reqwest::Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|e| ApiError::Config(e.to_string()))?;
        let url = resolve_url(&self.base_url, &request.path, &request.query)?;

        let mut req_builder = self.client.request(method.clone(), url.clone());

        for (k, v) in &request.extra_headers {
            req_builder = req_builder.header(k, v);
        }

        if let Some(token) = &request.bearer {
            req_builder = req_builder.bearer_auth(token);
        }

        req_builder = match request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Json(value) => req_builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(fields) => req_builder.multipart(build_form(fields)?),
        };

        tracing::debug!("[CampusHTTP-Out] {} {}", method, url);

        let response = req_builder
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_joins_base_and_path() {
        let url = resolve_url("http://localhost:8000/api", "/project/list", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/project/list");

        let url = resolve_url("http://localhost:8000/api/", "tags/", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/tags/");
    }

    #[test]
    fn test_resolve_url_encodes_query() {
        let query = vec![
            ("page".to_string(), "1".to_string()),
            ("search".to_string(), "deep learning".to_string()),
        ];
        let url = resolve_url("http://localhost/api", "/project/list", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost/api/project/list?page=1&search=deep+learning"
        );
    }

    #[test]
    fn test_resolve_url_absolute_path_wins() {
        let url = resolve_url("http://localhost/api", "https://cdn.example.com/f.pdf", &[]).unwrap();
        assert_eq!(url.host_str(), Some("cdn.example.com"));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let config = HttpConfig::with_base_url("not a url");
        assert!(matches!(NativeNetwork::new(&config), Err(ApiError::Config(_))));
    }
}

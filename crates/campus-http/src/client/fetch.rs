//! Main campus HTTP client.

use crate::client::config::HttpConfig;
use crate::client::native_network::NativeNetwork;
use crate::envelope::{self, Normalized};
use crate::error::Result;
use crate::traits::ApiNetwork;
use crate::types::{ApiRequest, ApiResponse};
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpClient {
    network: Arc<dyn ApiNetwork>,
    config: Arc<HttpConfig>,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpConfig::default())
    }

    pub fn with_config(config: HttpConfig) -> Result<Self> {
        let network = Arc::new(NativeNetwork::new(&config)?);
        Ok(HttpClient {
            network,
            config: Arc::new(config),
        })
    }

    /// Uses a caller-supplied network, e.g. a scripted one in tests.
    pub fn with_network(network: Arc<dyn ApiNetwork>, config: HttpConfig) -> Self {
        HttpClient {
            network,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Sends the request and returns the raw response, whatever its status.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.log_request(&request);
        let method = request.method.clone();
        let path = request.path.clone();
        match self.network.send(request).await {
            Ok(response) => {
                self.log_response(&method, &path, &response);
                Ok(response)
            }
            Err(e) => {
                if self.config.enable_logging {
                    tracing::warn!("[CampusHTTP] {} {} failed: {}", method, path, e);
                }
                Err(e)
            }
        }
    }

    /// Sends the request and applies envelope normalization.
    pub async fn request(&self, request: ApiRequest) -> Result<Normalized> {
        let response = self.send(request).await?;
        envelope::normalize(&response)
    }

    /// Sends the request and returns the body bytes of a 2xx response.
    pub async fn request_bytes(&self, request: ApiRequest) -> Result<bytes::Bytes> {
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(envelope::status_error(&response));
        }
        Ok(response.body)
    }

    fn log_request(&self, request: &ApiRequest) {
        if self.config.enable_logging {
            tracing::debug!(
                "[CampusHTTP-Out] {} {} query={:?} auth={}",
                request.method,
                request.path,
                request.query,
                request.bearer.is_some()
            );
        }
    }

    fn log_response(&self, method: &str, path: &str, response: &ApiResponse) {
        if self.config.enable_logging {
            tracing::debug!(
                "[CampusHTTP-In] {} {} -> {} ({} bytes)",
                method,
                path,
                response.status,
                response.body.len()
            );
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedNetwork(ApiResponse);

    #[async_trait]
    impl ApiNetwork for FixedNetwork {
        async fn send(&self, _request: ApiRequest) -> Result<ApiResponse> {
            Ok(self.0.clone())
        }
    }

    fn client_returning(response: ApiResponse) -> HttpClient {
        HttpClient::with_network(Arc::new(FixedNetwork(response)), HttpConfig::default())
    }

    #[test]
    fn test_client_init() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().request_timeout_ms, 10_000);
    }

    #[tokio::test]
    async fn test_request_normalizes() {
        let client = client_returning(ApiResponse::json(
            200,
            &json!({"code": 200, "data": {"has_unfinished": true}}),
        ));
        let value = client
            .request(ApiRequest::get("/cooperations/check-unfinished"))
            .await
            .unwrap();
        assert_eq!(value.into_data(), json!({"has_unfinished": true}));
    }

    #[tokio::test]
    async fn test_request_bytes_rejects_error_status() {
        let client = client_returning(ApiResponse::json(404, &json!({"msg": "file missing"})));
        let err = client
            .request_bytes(ApiRequest::get("/files/download"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "file missing");
    }
}

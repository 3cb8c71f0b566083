use crate::error::Result;
use crate::types::{ApiRequest, ApiResponse};
use async_trait::async_trait;

/// Abstraction for network operations.
///
/// The production implementation is [`crate::client::NativeNetwork`]; tests
/// substitute scripted networks.
#[async_trait]
pub trait ApiNetwork: Send + Sync + 'static {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

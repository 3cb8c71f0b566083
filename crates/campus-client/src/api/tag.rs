use crate::api::ApiClient;
use crate::error::Result;
use crate::models::Tag;
use campus_http::ApiRequest;
use serde_json::json;

pub async fn list(api: &ApiClient) -> Result<Vec<Tag>> {
    api.call_json(ApiRequest::get(&api.endpoints().tags)).await
}

/// Creates a custom tag; the name is trimmed first.
pub async fn create(api: &ApiClient, name: &str) -> Result<Tag> {
    let body = json!({ "name": name.trim() });
    api.call_json(ApiRequest::post(&api.endpoints().tags).with_json(body))
        .await
}

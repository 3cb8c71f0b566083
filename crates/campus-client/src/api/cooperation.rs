//! Cooperation workflow: a student applies to a post or a teacher invites a
//! student, then the other party confirms or rejects. Either side may cancel
//! while the record is pending.

use crate::api::ApiClient;
use crate::config::fill;
use crate::error::Result;
use crate::models::{CooperationRecord, CooperationRequest, UnfinishedCheck};
use campus_http::{ApiRequest, ListShape, Page};
use serde_json::json;

pub async fn apply_and_invite(
    api: &ApiClient,
    request: &CooperationRequest,
) -> Result<CooperationRecord> {
    let body = serde_json::to_value(request)?;
    api.call_json(
        ApiRequest::post(&api.endpoints().cooperation_apply_and_invite).with_json(body),
    )
    .await
}

pub async fn confirm(api: &ApiClient, cooperation_id: i64) -> Result<CooperationRecord> {
    transition(api, &api.endpoints().cooperation_confirm, cooperation_id).await
}

pub async fn reject(api: &ApiClient, cooperation_id: i64) -> Result<CooperationRecord> {
    transition(api, &api.endpoints().cooperation_reject, cooperation_id).await
}

pub async fn cancel(api: &ApiClient, cooperation_id: i64) -> Result<CooperationRecord> {
    transition(api, &api.endpoints().cooperation_cancel, cooperation_id).await
}

/// Cooperation records visible to the current user.
pub async fn list(api: &ApiClient) -> Result<Page<CooperationRecord>> {
    let normalized = api
        .call(ApiRequest::get(&api.endpoints().cooperation_list))
        .await?;
    Ok(ListShape::from_normalized(normalized)?.resolve(1, 0))
}

pub async fn check_unfinished(api: &ApiClient) -> Result<UnfinishedCheck> {
    api.call_json(ApiRequest::get(&api.endpoints().cooperation_check_unfinished))
        .await
}

// Older backend revisions read the id from the body rather than the path.
async fn transition(api: &ApiClient, template: &str, cooperation_id: i64) -> Result<CooperationRecord> {
    let request = ApiRequest::post(fill(template, cooperation_id))
        .with_json(json!({ "cooperation_id": cooperation_id }));
    api.call_json(request).await
}

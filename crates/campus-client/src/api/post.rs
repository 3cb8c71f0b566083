//! Likes, favorites and comments on a post. The backend expects the acting
//! user's id in the body, taken here from the session.

use crate::api::ApiClient;
use crate::config::fill;
use crate::error::{Error, Result};
use crate::models::Comment;
use campus_http::{ApiRequest, ListShape, Normalized};
use serde_json::{json, Value};

pub async fn like(api: &ApiClient, post_id: i64) -> Result<Normalized> {
    let body = action_body(api, post_id)?;
    api.call(ApiRequest::post(&api.endpoints().post_like).with_json(body))
        .await
}

pub async fn unlike(api: &ApiClient, post_id: i64) -> Result<Normalized> {
    let body = action_body(api, post_id)?;
    api.call(ApiRequest::delete(&api.endpoints().post_like).with_json(body))
        .await
}

pub async fn favorite(api: &ApiClient, post_id: i64) -> Result<Normalized> {
    let body = action_body(api, post_id)?;
    api.call(ApiRequest::post(&api.endpoints().post_favorite).with_json(body))
        .await
}

pub async fn unfavorite(api: &ApiClient, post_id: i64) -> Result<Normalized> {
    let body = action_body(api, post_id)?;
    api.call(ApiRequest::delete(&api.endpoints().post_favorite).with_json(body))
        .await
}

/// Posting again replaces the user's previous comment on the post.
pub async fn comment(api: &ApiClient, post_id: i64, text: &str) -> Result<Normalized> {
    let mut body = action_body(api, post_id)?;
    body["comment"] = Value::String(text.to_string());
    api.call(ApiRequest::post(&api.endpoints().post_comment).with_json(body))
        .await
}

pub async fn comments(api: &ApiClient, post_id: i64) -> Result<Vec<Comment>> {
    let normalized = api
        .call(ApiRequest::get(fill(&api.endpoints().post_comments, post_id)))
        .await?;
    Ok(ListShape::from_normalized(normalized)?.resolve(1, 0).items)
}

fn action_body(api: &ApiClient, post_id: i64) -> Result<Value> {
    let user = api.session().user().ok_or(Error::NotLoggedIn)?;
    Ok(json!({ "post_id": post_id, "user_id": user.id }))
}

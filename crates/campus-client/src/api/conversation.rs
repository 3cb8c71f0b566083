use crate::api::project::{upload_attachment, Attachment, AttachmentScope};
use crate::api::ApiClient;
use crate::config::fill;
use crate::error::Result;
use crate::models::{
    AutoReplySettings, ConversationCreated, MessageKind, MessagePage, UploadedAttachment,
};
use campus_http::{ApiRequest, Normalized};
use serde_json::json;

/// Cursor paging for messages, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageQuery {
    /// Only messages older than this id.
    pub cursor: Option<i64>,
    pub limit: u32,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            cursor: None,
            limit: 20,
        }
    }
}

/// Opens a conversation about a post, or returns the existing one between
/// the two users.
pub async fn create(api: &ApiClient, post_id: i64, receiver_id: i64) -> Result<ConversationCreated> {
    let body = json!({ "post_id": post_id, "receiver_id": receiver_id });
    api.call_json(ApiRequest::post(&api.endpoints().conversation_create).with_json(body))
        .await
}

/// Raw list call; the conversation store decodes the shape.
pub async fn list(api: &ApiClient, query: Vec<(String, String)>) -> Result<Normalized> {
    api.call(ApiRequest::get(&api.endpoints().conversation_list).with_query_pairs(query))
        .await
}

pub async fn send_message(
    api: &ApiClient,
    conversation_id: i64,
    kind: MessageKind,
    content: &str,
) -> Result<Normalized> {
    let body = json!({ "type": kind, "content": content });
    api.call(ApiRequest::post(fill(&api.endpoints().message_send, conversation_id)).with_json(body))
        .await
}

pub async fn messages(
    api: &ApiClient,
    conversation_id: i64,
    query: MessageQuery,
) -> Result<MessagePage> {
    let mut request = ApiRequest::get(fill(&api.endpoints().message_list, conversation_id))
        .with_query("limit", query.limit.to_string());
    if let Some(cursor) = query.cursor {
        request = request.with_query("cursor", cursor.to_string());
    }
    api.call_json(request).await
}

pub async fn close(api: &ApiClient, conversation_id: i64) -> Result<Normalized> {
    api.call(ApiRequest::patch(fill(&api.endpoints().conversation_close, conversation_id)))
        .await
}

pub async fn auto_reply_settings(api: &ApiClient) -> Result<AutoReplySettings> {
    api.call_json(ApiRequest::get(&api.endpoints().auto_reply_settings))
        .await
}

pub async fn update_auto_reply_settings(
    api: &ApiClient,
    settings: &AutoReplySettings,
) -> Result<AutoReplySettings> {
    let body = serde_json::to_value(settings)?;
    api.call_json(ApiRequest::patch(&api.endpoints().auto_reply_settings).with_json(body))
        .await
}

/// Uploads a file to share inside a conversation.
pub async fn upload_file(api: &ApiClient, file: Attachment) -> Result<UploadedAttachment> {
    upload_attachment(api, AttachmentScope::Conversation, file).await
}

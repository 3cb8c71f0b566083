//! Projects: listing, detail, publishing and attachments.

use crate::api::ApiClient;
use crate::config::fill;
use crate::error::Result;
use crate::models::{ProjectDetail, ProjectStats, PublishKind, PublishResponse, UploadedAttachment};
use bytes::Bytes;
use campus_http::{ApiRequest, FormField, Normalized};
use serde_json::Value;
use std::path::Path;

/// Sentinel `post_id` for files shared in a conversation.
pub const CONVERSATION_POST_ID: i64 = -1;

/// What an uploaded file is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentScope {
    Project(i64),
    Conversation,
}

impl AttachmentScope {
    pub fn post_id(&self) -> i64 {
        match self {
            AttachmentScope::Project(id) => *id,
            AttachmentScope::Conversation => CONVERSATION_POST_ID,
        }
    }
}

/// A file to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, data))
    }
}

/// Raw list call; query pairs are built by the caller.
pub async fn list(api: &ApiClient, query: Vec<(String, String)>) -> Result<Normalized> {
    api.call(ApiRequest::get(&api.endpoints().project_list).with_query_pairs(query))
        .await
}

pub async fn detail(api: &ApiClient, post_id: i64) -> Result<ProjectDetail> {
    api.call_json(ApiRequest::get(fill(&api.endpoints().project_detail, post_id)))
        .await
}

pub async fn stats(api: &ApiClient, post_id: i64) -> Result<ProjectStats> {
    let request =
        ApiRequest::get(&api.endpoints().project_stats).with_query("post_id", post_id.to_string());
    api.call_json(request).await
}

/// Publishes a post of the given kind. `fields` is the kind-specific form.
pub async fn publish(api: &ApiClient, kind: PublishKind, fields: Value) -> Result<PublishResponse> {
    let endpoints = api.endpoints();
    let path = match kind {
        PublishKind::Research => &endpoints.publish_research,
        PublishKind::Competition => &endpoints.publish_competition,
        PublishKind::Personal => &endpoints.publish_personal,
    };
    api.call_json(ApiRequest::post(path).with_json(fields)).await
}

/// Downloads a stored file; the body is returned as-is.
pub async fn download(api: &ApiClient, file_url: &str) -> Result<Bytes> {
    let request =
        ApiRequest::get(&api.endpoints().file_download).with_query("file_url", file_url);
    api.call_bytes(request).await
}

pub async fn upload_attachment(
    api: &ApiClient,
    scope: AttachmentScope,
    file: Attachment,
) -> Result<UploadedAttachment> {
    let fields = vec![
        FormField::File {
            name: "file".to_string(),
            file_name: file.file_name,
            content_type: file.content_type,
            data: file.data,
        },
        FormField::text("post_id", scope.post_id().to_string()),
    ];
    api.call_json(ApiRequest::post(&api.endpoints().attachment_upload).with_multipart(fields))
        .await
}

//! Wire and domain types.
//!
//! Field names follow the backend's JSON keys. Unknown fields are ignored and
//! most optional fields default, since the backend's shapes drift between
//! revisions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Account identity. Encoded as `0` (student) / `1` (teacher) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    Student,
    Teacher,
}

impl TryFrom<i64> for Role {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Role::Student),
            1 => Ok(Role::Teacher),
            other => Err(format!("unknown identity {}", other)),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => 0,
            Role::Teacher => 1,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "0" => Ok(Role::Student),
            "teacher" | "1" => Ok(Role::Teacher),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Teacher => f.write_str("teacher"),
        }
    }
}

/// Profile of the signed-in user, also the `userInfo` storage record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "user_id")]
    pub id: i64,
    #[serde(rename = "identity")]
    pub role: Role,
    #[serde(default)]
    pub account: String,
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub identity: Role,
    pub account: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identity", &self.identity)
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub identity: Role,
    #[serde(default)]
    pub name: String,
    pub token: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterDetails {
    pub identity: Role,
    pub account: String,
    pub name: String,
    pub password: String,
    /// `grade` for students, `title` for teachers.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Debug for RegisterDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterDetails")
            .field("identity", &self.identity)
            .field("account", &self.account)
            .field("name", &self.name)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub identity: Role,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub post_id: i64,
    #[serde(default)]
    pub post_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "publisher_name")]
    pub teacher_name: String,
    #[serde(default)]
    pub like_num: u64,
    #[serde(default)]
    pub favorite_num: u64,
    #[serde(default)]
    pub comment_num: u64,
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Detail view; the per-type fields vary, so they stay as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub post_id: i64,
    #[serde(default)]
    pub post_type: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    #[serde(default)]
    pub like_num: u64,
    #[serde(default)]
    pub favorite_num: u64,
    #[serde(default)]
    pub comment_num: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishKind {
    Research,
    Competition,
    Personal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResponse {
    pub post_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(alias = "id")]
    pub conversation_id: i64,
    #[serde(default)]
    pub user1_id: Option<i64>,
    #[serde(default)]
    pub user2_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default)]
    pub last_message_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationCreated {
    pub conversation_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    File,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub conversation_id: Option<i64>,
    #[serde(default)]
    pub sender_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub conversation_id: Option<i64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoReplySettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub comment_id: Option<i64>,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, alias = "comment")]
    pub content: String,
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Lifecycle state of a cooperation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum CooperationStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
    Other(i64),
}

impl From<i64> for CooperationStatus {
    fn from(value: i64) -> Self {
        match value {
            2 => CooperationStatus::Pending,
            3 => CooperationStatus::Confirmed,
            4 => CooperationStatus::Rejected,
            5 => CooperationStatus::Canceled,
            other => CooperationStatus::Other(other),
        }
    }
}

impl From<CooperationStatus> for i64 {
    fn from(status: CooperationStatus) -> Self {
        match status {
            CooperationStatus::Pending => 2,
            CooperationStatus::Confirmed => 3,
            CooperationStatus::Rejected => 4,
            CooperationStatus::Canceled => 5,
            CooperationStatus::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooperationRecord {
    pub cooperation_id: i64,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub status: Option<CooperationStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of an apply/invite call. Students apply to a post; teachers invite a
/// student to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooperationRequest {
    pub post_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfinishedCheck {
    pub has_unfinished: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedAttachment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub attachment_id: String,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts a JSON string, number or bool and keeps its text form.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

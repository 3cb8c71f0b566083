//! Backend response envelope and its normalization.
//!
//! Most endpoints wrap their payload as `{code, msg, data}`. Some answer with
//! a bare JSON document instead, and error responses may carry `msg`,
//! `error` or `detail`. [`normalize`] reconciles these into a single
//! [`Normalized`] value or an [`ApiError`].

use crate::error::{ApiError, Result, DEFAULT_ERROR_MESSAGE};
use crate::types::ApiResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CODE_OK: i64 = 200;
pub const CODE_CREATED: i64 = 201;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Successful outcome of a request, tagged by the shape the backend used.
#[derive(Clone, Debug, PartialEq)]
pub enum Normalized {
    /// Body without a `code` field, or a `code == 200` envelope lacking `data`.
    Bare(Value),
    /// `data` of a `code == 200` envelope.
    Data(Value),
    /// Full `code == 201` envelope.
    Created(Envelope),
}

impl Normalized {
    /// Canonical payload: `data` when the backend wrapped one, else the body.
    pub fn into_data(self) -> Value {
        match self {
            Normalized::Bare(value) | Normalized::Data(value) => value,
            Normalized::Created(envelope) => match envelope.data {
                Some(data) => data,
                None => serde_json::to_value(&envelope).unwrap_or(Value::Null),
            },
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_data())?)
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Normalized::Created(_))
    }
}

/// Normalizes a raw transport response.
pub fn normalize(response: &ApiResponse) -> Result<Normalized> {
    if !response.is_success() {
        return Err(status_error(response));
    }
    match response.body_json() {
        None => Ok(Normalized::Bare(Value::Null)),
        Some(parsed) => normalize_value(parsed?),
    }
}

/// Applies the envelope rules to an already parsed body.
pub fn normalize_value(body: Value) -> Result<Normalized> {
    let code = match body.get("code") {
        None => return Ok(Normalized::Bare(body)),
        Some(code) => code.as_i64(),
    };

    match code {
        Some(CODE_OK) => match present(&body, "data") {
            Some(data) => Ok(Normalized::Data(data.clone())),
            None => Ok(Normalized::Bare(body)),
        },
        Some(CODE_CREATED) => Ok(Normalized::Created(Envelope {
            code: CODE_CREATED,
            msg: text_field(&body, "msg"),
            data: present(&body, "data").cloned(),
        })),
        other => Err(ApiError::Business {
            code: other.unwrap_or_default(),
            msg: text_field(&body, "msg").unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        }),
    }
}

/// Builds the error for a non-2xx response, extracting the best message.
pub fn status_error(response: &ApiResponse) -> ApiError {
    let from_body = response
        .body_json()
        .and_then(|parsed| parsed.ok())
        .and_then(|body| {
            ["msg", "error", "detail"]
                .iter()
                .find_map(|key| text_field(&body, key))
        });

    ApiError::Status {
        status: response.status,
        msg: from_body.unwrap_or_else(|| response.reason()),
    }
}

fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

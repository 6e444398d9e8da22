// ================
// common/src/lib.rs
// ================
//! Common types shared between the linkkeeper backend and its clients.
//! This module defines the link records and the JSON response envelope.

use serde::{Deserialize, Serialize};

/// Link identifier type
pub type LinkId = u64;

/// Principal resolved from a bearer token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user identifier
    pub uid: String,
    /// Display name, if the token source knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: None,
        }
    }
}

/// A stored bookmark link
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link identifier
    pub id: LinkId,
    /// Owner of the link
    pub user_id: String,
    /// Bookmarked URL
    pub url: String,
    /// Free-form description
    pub description: String,
    /// Optional preview image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation time, `%Y-%m-%d %H:%M:%S`
    pub created_at: String,
}

/// Fields supplied when creating a link
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Envelope wrapping every HTTP response body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Machine readable error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Error response with a message
    pub fn error(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: Some(message.into()),
            result: None,
        }
    }
}

//! Response DTOs.

use serde::{Deserialize, Serialize};

use tablehub_core::types::PageResponse;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Creates a successful response with a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// One page of a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Items in this page.
    pub data: Vec<T>,
    /// Total matching items.
    pub total: u64,
    /// Current page.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
}

impl<T: Serialize> From<PageResponse<T>> for ListResponse<T> {
    fn from(page: PageResponse<T>) -> Self {
        Self {
            success: true,
            data: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the request was successful.
    pub success: bool,
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a successful message response.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Store reachability.
    pub store: String,
}

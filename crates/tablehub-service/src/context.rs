//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tablehub_core::types::UserId;
use tablehub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from verified token claims and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// Display name from the token, if any.
    pub display_name: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole, display_name: Option<String>) -> Self {
        Self {
            user_id,
            role,
            display_name,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller may use the staff profile.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff_or_above()
    }
}

//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangrah_core::types::id::UserId;

/// Context for the current request.
///
/// Authentication happens upstream; by the time a request reaches a service
/// the actor is either a known user or absent for system-triggered work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user, if any.
    pub actor: Option<UserId>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for a request made by `actor`.
    pub fn new(actor: Option<UserId>) -> Self {
        Self {
            actor,
            request_time: Utc::now(),
        }
    }

    /// Context for work the system performs on its own behalf.
    pub fn system() -> Self {
        Self::new(None)
    }

    /// Context for a known user.
    pub fn user(user_id: UserId) -> Self {
        Self::new(Some(user_id))
    }
}

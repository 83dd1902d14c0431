//! `Actor` extractor: the acting user named by the upstream gateway.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use sangrah_core::error::AppError;
use sangrah_core::types::id::UserId;
use sangrah_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated user's ID.
pub const ACTOR_HEADER: &str = "x-user-id";

/// Request context built from the `X-User-Id` header.
///
/// A missing header means a system-triggered request with no actor.
#[derive(Debug, Clone)]
pub struct Actor(pub RequestContext);

impl std::ops::Deref for Actor {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(ACTOR_HEADER) else {
            return Ok(Self(RequestContext::system()));
        };

        let user_id = raw
            .to_str()
            .ok()
            .map(str::trim)
            .and_then(|v| v.parse::<UserId>().ok())
            .ok_or_else(|| AppError::validation("X-User-Id must be a UUID"))?;

        Ok(Self(RequestContext::user(user_id)))
    }
}

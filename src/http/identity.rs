//! Viewer identity extraction.
//!
//! The upstream identity provider (session gateway, reverse proxy) resolves
//! the authenticated user and injects `x-viewer-role` and `x-viewer-id`
//! headers. This extractor turns them into a typed [`Viewer`]; requests
//! without a complete, well-formed identity are rejected with 401 before any
//! handler logic runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::AppError;
use crate::api::{InstructorId, Role, Viewer};

/// Header carrying the resolved viewer role.
pub const VIEWER_ROLE_HEADER: &str = "x-viewer-role";

/// Header carrying the resolved viewer identifier.
pub const VIEWER_ID_HEADER: &str = "x-viewer-id";

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AppError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| AppError::Unauthenticated(format!("Missing {} header", name)))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated(format!("Malformed {} header", name)))
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role: Role = header_value(parts, VIEWER_ROLE_HEADER)?
            .parse()
            .map_err(|e: String| AppError::Unauthenticated(e))?;
        let id: i64 = header_value(parts, VIEWER_ID_HEADER)?
            .parse()
            .map_err(|_| {
                AppError::Unauthenticated(format!("Malformed {} header", VIEWER_ID_HEADER))
            })?;

        Ok(Viewer::new(role, InstructorId::new(id)))
    }
}

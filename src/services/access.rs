//! Authorization guard applied at service entry points.
//!
//! The guard stays outside the conflict checker: it answers only "may this
//! viewer attempt the operation", never "would the operation succeed".

use crate::api::{Role, Viewer};
use crate::services::error::SchedulingError;

/// Roles allowed to create, update and delete assignments.
pub const SCHEDULE_EDITORS: &[Role] = &[Role::Admin, Role::Staff];

/// Roles allowed to mutate the laboratory and course catalogs.
pub const CATALOG_EDITORS: &[Role] = &[Role::Admin, Role::Staff];

/// Roles allowed to mutate the instructor directory.
pub const DIRECTORY_ADMINS: &[Role] = &[Role::Admin];

/// Pass or reject a viewer against a required role set.
pub fn require_role(
    viewer: &Viewer,
    allowed: &[Role],
    action: &str,
) -> Result<(), SchedulingError> {
    if allowed.contains(&viewer.role) {
        Ok(())
    } else {
        log::warn!("viewer {} ({}) rejected: {}", viewer.id, viewer.role, action);
        Err(SchedulingError::Unauthorized {
            role: viewer.role,
            action: action.to_string(),
        })
    }
}

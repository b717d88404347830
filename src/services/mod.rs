//! Service layer for business logic and orchestration.
//!
//! This module sits between the HTTP handlers and the repository layer. It
//! owns the operations the scheduling rules attach to: the assignment
//! lifecycle, the role-restricted listing, catalog maintenance, and the
//! authorization guard applied at every entry point.

pub mod access;

pub mod assignments;

pub mod catalog;

pub mod error;

pub mod visibility;

pub use assignments::{create_assignment, delete_assignment, update_assignment};
pub use error::{SchedulingError, ServiceResult};
pub use visibility::list_assignments;

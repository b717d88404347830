//! Scheduling core: the conflict checker and its scope-key configuration.
//!
//! Everything here is pure. The checker inspects a snapshot of live
//! assignments and reports the first violation of the exclusivity rules;
//! mutation and locking live in the repository layer.

pub mod conflicts;
pub mod scope;

pub use conflicts::{find_conflict, Conflict, ConflictKind};
pub use scope::ConflictScope;

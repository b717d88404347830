//! # labsched
//!
//! Laboratory session scheduling backend.
//!
//! This crate assigns laboratory course sessions to weekly time slots while
//! guaranteeing that no laboratory and no instructor is double-booked. It
//! exposes the scheduling core (conflict detection, assignment lifecycle,
//! role-aware listing) behind a repository-pattern storage layer and an
//! axum REST API.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and the typed records shared across layers
//! - [`models`]: Validated scheduling value types (weekday, time slot)
//! - [`scheduling`]: The pure conflict checker and its scope-key configuration
//! - [`db`]: Repository traits, in-memory and Postgres implementations
//! - [`services`]: Assignment lifecycle, visibility filtering, role guards
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod scheduling;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

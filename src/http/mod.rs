//! HTTP server module for the scheduling backend.
//!
//! This module provides an axum-based HTTP server that exposes the
//! scheduling core as a REST API. It reuses the service layer, the
//! repository pattern and the typed records from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Viewer identity extraction from trusted headers        │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization, CORS, compression, error mapping   │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Role guards, lifecycle, visibility filtering           │
//! └───────────────────┬──────────────────────────────────────┘
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;

pub mod error;

pub mod handlers;

pub mod identity;

pub mod router;

pub mod state;

pub use router::create_router;

pub use state::AppState;

//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! and the admin CLI call. Storage and code generation are injected, so every
//! service can run against mocks, the in-memory store, or PostgreSQL.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, listing, stats, deletion
//! - [`services::redirect_service::RedirectService`] - Code resolution and visit recording

pub mod services;

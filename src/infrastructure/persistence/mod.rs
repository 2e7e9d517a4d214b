//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage on PostgreSQL
//! - [`PgClickRepository`] - Click log on PostgreSQL
//! - [`MemoryStore`] - Both contracts in process memory, for local runs and tests

pub mod memory_store;
pub mod pg_click_repository;
pub mod pg_link_repository;

pub use memory_store::MemoryStore;
pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;

//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! [`crate::infrastructure::persistence`] (PostgreSQL and in-memory).
//! Mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link store: code uniqueness and visit counters
//! - [`ClickRepository`] - Click log: append-only visit records

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;

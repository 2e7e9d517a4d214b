//! Data Transfer Objects for API requests and responses.
//!
//! Field names here are the wire contract with clients. DTOs use Serde for
//! JSON and `validator` for request bounds.

pub mod clicks;
pub mod health;
pub mod links;
pub mod stats;

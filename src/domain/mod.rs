//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visit`] - Client metadata captured for a single redirect
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in
//! [`crate::infrastructure::persistence`].
//!
//! # Visit Recording Flow
//!
//! 1. The redirect handler extracts a [`visit::Visit`] from the request
//! 2. [`crate::application::services::RedirectService`] resolves the code
//! 3. A click is appended via [`repositories::ClickRepository`]
//! 4. The visit counter is bumped via [`repositories::LinkRepository`]

pub mod entities;
pub mod repositories;
pub mod visit;

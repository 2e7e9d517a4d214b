//! Core domain entities.
//!
//! - [`Link`] - A short code mapped to a target URL, with its visit counter
//! - [`Click`] - A single recorded visit of a link
//!
//! Records that are written but not yet stored use separate input types
//! ([`NewLink`], [`NewClick`]); identifiers and timestamps are assigned by
//! the store.

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};

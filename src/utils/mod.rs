//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - Target URL validation
//! - [`client_ip`] - Originating address extraction from requests

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;

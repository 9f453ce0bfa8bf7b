//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Syntactic long URL validation
//! - [`request_host`] - Public host extraction from HTTP headers
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod request_host;
pub mod url_validator;

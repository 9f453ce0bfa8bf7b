//! Application layer services implementing business logic.
//!
//! Services orchestrate the validator, the code generator and the record
//! store, and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Get-or-create short codes for long URLs
//! - [`services::redirect_service::RedirectService`] - Short code resolution and click counting

pub mod services;

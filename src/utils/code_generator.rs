//! Short code generation.
//!
//! Codes are 6 characters drawn uniformly from `A-Z`, `a-z` and `0-9`.
//! The generator is not cryptographically secure and collisions are possible;
//! [`crate::application::services::ShortenService`] retries on collision.

use rand::Rng;

/// Characters a short code may contain.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Codes that collide with routes served by the application itself.
pub const RESERVED_CODES: &[&str] = &["health", "shorten"];

/// Source of candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// [`CodeGenerator`] backed by the thread-local `rand` RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random short code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if the code would shadow an application route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

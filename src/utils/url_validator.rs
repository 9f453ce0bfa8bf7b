//! Syntactic validation of long URLs.
//!
//! This is a pattern check only: no DNS lookup or request is made, so a
//! passing URL may still be unreachable.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled pattern for accepted long URLs.
///
/// Optional `http`/`https` scheme, a dotted hostname ending in an alphabetic
/// label of at least two letters or an IPv4 literal, then optional port, path,
/// query and fragment. ASCII only, case-insensitive.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i-u)^(https?://)?",
        r"((([a-z0-9]([a-z0-9-]*[a-z0-9])*)\.)+[a-z]{2,}",
        r"|(([0-9]{1,3}\.){3}[0-9]{1,3}))",
        r"(:[0-9]+)?",
        r"(/[-a-z0-9%_.~+]*)*",
        r"(\?[-;&a-z0-9%_.~+=]*)?",
        r"(#[-a-z0-9_]*)?$",
    ))
    .expect("URL pattern must compile")
});

/// Returns true if `candidate` looks like a web address worth shortening.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com/a?b=1"));
/// assert!(is_valid_url("example.com"));
/// assert!(!is_valid_url("ftp://example.com"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    URL_REGEX.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_http_and_https() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("https://www.rust-lang.org"));
    }

    #[test]
    fn test_accepts_path_query_and_fragment() {
        assert!(is_valid_url("https://example.com/a?b=1"));
        assert!(is_valid_url("https://example.com/docs/page.html"));
        assert!(is_valid_url("https://example.com/search?q=rust&lang=en"));
        assert!(is_valid_url("https://example.com/page#section_2"));
        assert!(is_valid_url("https://example.com/a%20b/~user/"));
    }

    #[test]
    fn test_accepts_port() {
        assert!(is_valid_url("http://example.com:8080/path"));
    }

    #[test]
    fn test_accepts_ipv4_literal() {
        assert!(is_valid_url("http://192.168.1.1"));
        assert!(is_valid_url("http://10.0.0.1:3000/health"));
    }

    #[test]
    fn test_is_case_insensitive() {
        assert!(is_valid_url("HTTPS://EXAMPLE.COM/Path"));
        assert!(is_valid_url("Http://Example.Org"));
    }

    #[test]
    fn test_accepts_scheme_less_hostname() {
        assert!(is_valid_url("example.com"));
        assert!(is_valid_url("sub.example.co.uk/path"));
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!is_valid_url("ftp://x"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("htp://example.com"));
    }

    #[test]
    fn test_rejects_hostname_without_top_level_label() {
        assert!(!is_valid_url("http://localhost"));
        assert!(!is_valid_url("http://localhost:3000"));
        assert!(!is_valid_url("http://example.c"));
        assert!(!is_valid_url("http://example.123"));
    }

    #[test]
    fn test_rejects_bad_hyphen_placement() {
        assert!(!is_valid_url("http://-example.com"));
        assert!(!is_valid_url("http://example-.com"));
    }

    #[test]
    fn test_rejects_characters_outside_allowed_sets() {
        assert!(!is_valid_url("https://example.com/a b"));
        assert!(!is_valid_url("https://example.com/?q=<script>"));
        assert!(!is_valid_url("https://exämple.com"));
    }
}

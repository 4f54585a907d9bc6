//! URL-likeness check for saved text.

use std::sync::LazyLock;

use regex::Regex;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?|ftp)://[^\s/?#]+\S*$").unwrap());

static WWW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^www\.\S+$").unwrap());

static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(:\d{1,5})?([/?#]\S*)?$").unwrap()
});

/// Returns true when `s` looks like a URL.
///
/// Accepts `http`, `https` and `ftp` URLs, anything starting with `www.`,
/// and bare host names such as `example.com/path`.
pub fn is_valid_url(s: &str) -> bool {
    SCHEME_RE.is_match(s) || WWW_RE.is_match(s) || HOST_RE.is_match(s)
}

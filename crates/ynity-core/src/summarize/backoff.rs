//! Rate-limit wait extraction.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// Matches hints like "Please try again in 2.35s".
static RETRY_HINT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)try again in ([0-9.]+)s").ok());

/// Wait suggested by a rate-limit error, or `default` if none can be parsed.
pub fn retry_after(detail: &str, default: Duration) -> Duration {
    RETRY_HINT
        .as_ref()
        .and_then(|pattern| pattern.captures(detail))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or(default)
}

//! Credential extraction.
//!
//! Users paste credentials in two shapes: a whole cookie header copied from
//! the browser, or the bare token value. Both normalize to a single
//! `MUSIC_U=<value>` fragment, which is the only thing forwarded to the
//! companion app.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Name of the session cookie carried by a [`Credential`].
pub const COOKIE_NAME: &str = "MUSIC_U";

/// Minimum length of a bare token accepted without the `MUSIC_U=` prefix.
///
/// A length heuristic against short garbage, not a validity check.
pub const MIN_BARE_TOKEN_LEN: usize = 100;

/// First `MUSIC_U=` pair inside a cookie header, up to the next `;`.
#[allow(clippy::expect_used)]
static FRAGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"MUSIC_U=[^;]+").expect("fragment regex is valid") // Static pattern, safe to panic
});

/// A normalized `MUSIC_U=<value>` cookie fragment.
///
/// Only [`extract`] constructs one, so the value is never empty and never
/// contains `;`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// The full fragment, including the `MUSIC_U=` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token value after the `MUSIC_U=` prefix.
    pub fn value(&self) -> &str {
        &self.0[COOKIE_NAME.len() + 1..]
    }

    /// Consume into the full fragment string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}=[{} chars REDACTED])", COOKIE_NAME, self.value().len())
    }
}

/// Normalize pasted input into a credential fragment.
///
/// In order, first match wins:
/// 1. Blank input yields `None`.
/// 2. A `MUSIC_U=` pair anywhere in the trimmed input is returned verbatim,
///    stopping at the first `;`.
/// 3. A trimmed input made only of `A-Z0-9`, at least
///    [`MIN_BARE_TOKEN_LEN`] long, is prefixed with `MUSIC_U=`.
/// 4. Anything else yields `None`.
pub fn extract(raw: &str) -> Option<Credential> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(fragment) = FRAGMENT_PATTERN.find(trimmed) {
        return Some(Credential(fragment.as_str().to_string()));
    }

    if is_bare_token(trimmed) {
        return Some(Credential(format!("{}={}", COOKIE_NAME, trimmed)));
    }

    None
}

/// [`extract`] for an untyped host value. Anything but a string yields `None`.
pub fn extract_value(raw: &Value) -> Option<Credential> {
    raw.as_str().and_then(extract)
}

fn is_bare_token(input: &str) -> bool {
    input.len() >= MIN_BARE_TOKEN_LEN
        && input
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

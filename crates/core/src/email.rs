//! E-mail address checks applied before calling the identity provider.

use std::sync::LazyLock;

use regex::Regex;

/// Loose shape check: something, `@`, something, `.`, something, no whitespace.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Outcome of [`check_email`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailCheck {
    Valid,
    Missing,
    Malformed,
}

/// Classify an address entered on the login form.
///
/// Surrounding whitespace is not trimmed; an address with a leading space is
/// malformed, the same as the form would treat it.
pub fn check_email(email: &str) -> EmailCheck {
    if email.is_empty() {
        EmailCheck::Missing
    } else if EMAIL_RE.is_match(email) {
        EmailCheck::Valid
    } else {
        EmailCheck::Malformed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_missing() {
        assert_eq!(check_email(""), EmailCheck::Missing);
    }

    #[test]
    fn accepts_plain_addresses() {
        assert_eq!(check_email("m@example.com"), EmailCheck::Valid);
        assert_eq!(check_email("first.last+tag@sub.domain.pl"), EmailCheck::Valid);
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["plain", "no-at.example.com", "a@b", "a b@c.d", "@example.com", " a@b.c"] {
            assert_eq!(check_email(bad), EmailCheck::Malformed, "{bad:?}");
        }
    }
}

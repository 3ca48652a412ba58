// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use regex::Regex;
use std::sync::LazyLock;

pub mod shutdown;

#[macro_export]
macro_rules! mailsift_version {
    () => {
        env!("CARGO_PKG_VERSION")
    };
}

#[macro_export]
macro_rules! utc_now {
    () => {{
        use chrono::Utc;
        Utc::now().timestamp_millis()
    }};
}

#[macro_export]
macro_rules! raise_error {
    ($msg:expr, $code:expr) => {
        $crate::modules::error::MailSiftError::Generic {
            message: $msg,
            location: snafu::Location::default(),
            code: $code,
        }
    };
}

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer pattern"));

/// Reads the integer prefix of `input`, the way browsers and form libraries
/// coerce loosely typed query values: `" 42"`, `"42px"` and `"+7"` parse,
/// `"abc"` and `""` do not.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    LEADING_INT
        .captures(input)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Lowercases `text` with full Unicode case mapping. Searchable columns are
/// stored folded and search terms are folded the same way, so matching
/// ignores case beyond ASCII.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Escapes the `LIKE` wildcards in `term` and wraps it in `%` so the term
/// matches as a literal substring. Pair with `ESCAPE '\'`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

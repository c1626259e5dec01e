//! Whitespace normalization for extracted PDF text.

use regex::Regex;
use std::sync::OnceLock;

fn blank_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("newline-run pattern should be valid"))
}

/// Canonicalize raw text for line-oriented parsing.
///
/// NUL bytes and tabs become single spaces, carriage returns become
/// newlines, and any run of two or more newlines collapses to one.
/// A missing input normalizes to the empty string.
///
/// # Example
/// ```
/// use tide_table_lib::normalize::normalize_spaces;
///
/// assert_eq!(normalize_spaces(Some("01\tQUA\r\n\n0512")), "01 QUA\n0512");
/// assert_eq!(normalize_spaces(None), "");
/// ```
pub fn normalize_spaces(raw: Option<&str>) -> String {
    let replaced: String = raw
        .unwrap_or_default()
        .chars()
        .map(|c| match c {
            '\0' | '\t' => ' ',
            '\r' => '\n',
            other => other,
        })
        .collect();
    blank_runs().replace_all(&replaced, "\n").into_owned()
}

//! Batch transport envelope unwrapping.
//!
//! A batch response looks like
//!
//! ```text
//! )]}'
//!
//! 45
//! [["wrb.fr","CNgdBe","[...]",null,null,null,"generic"]]
//! 25
//! [["e",4,null,null,131]]
//! ```
//!
//! The anti-hijacking prefix is stripped and the body is cut at every line
//! consisting only of decimal digits (the chunk length framing). Chunk
//! lengths are not trusted; they count UTF-16 units on the wire and are
//! frequently off by the line terminator.

use lazy_static::lazy_static;
use regex::Regex;

/// Anti-hijacking prefix some JSON endpoints prepend to their bodies.
pub const XSSI_PREFIX: &str = ")]}'";

lazy_static! {
    static ref CHUNK_BOUNDARY: Regex = Regex::new(r"(?:\r?\n|^)\d+\r?\n").unwrap();
}

/// Strip the prefix (and any whitespace after it) if present.
pub fn strip_prefix(body: &str) -> &str {
    match body.strip_prefix(XSSI_PREFIX) {
        Some(rest) => rest.trim_start(),
        None => body,
    }
}

/// Split a response body into candidate JSON segments, in order.
///
/// Never fails: a body without any length lines yields a single segment
/// holding everything after the prefix. Empty pieces are dropped; pieces
/// that are not JSON are left for the section matcher to reject.
pub fn unwrap_envelope(body: &str) -> Vec<&str> {
    CHUNK_BOUNDARY
        .split(strip_prefix(body))
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_prefix_and_leading_length() {
        let body = ")]}'\n45\n[[\"wrb.fr\"]]";
        assert_eq!(unwrap_envelope(body), vec!["[[\"wrb.fr\"]]"]);
    }

    #[test]
    fn splits_mid_stream_lengths() {
        let body = ")]}'\n\n12\n[[\"a\"]]\n25\n[[\"b\"]]\n7\n[[\"c\"]]";
        assert_eq!(
            unwrap_envelope(body),
            vec!["[[\"a\"]]", "[[\"b\"]]", "[[\"c\"]]"]
        );
    }

    #[test]
    fn tolerates_crlf() {
        let body = ")]}'\r\n12\r\n[[\"a\"]]\r\n25\r\n[[\"b\"]]";
        assert_eq!(unwrap_envelope(body), vec!["[[\"a\"]]", "[[\"b\"]]"]);
    }

    #[test]
    fn body_without_framing_is_one_segment() {
        assert_eq!(unwrap_envelope("[[\"a\"]]"), vec!["[[\"a\"]]"]);
        assert_eq!(unwrap_envelope(")]}' [1,2]"), vec!["[1,2]"]);
    }

    #[test]
    fn empty_body_yields_nothing() {
        assert!(unwrap_envelope("").is_empty());
        assert!(unwrap_envelope(")]}'").is_empty());
        assert!(unwrap_envelope(")]}'\n12\n").is_empty());
    }

    #[test]
    fn digits_inside_json_are_not_boundaries() {
        let body = "12\n[[\"a\",123]]";
        assert_eq!(unwrap_envelope(body), vec!["[[\"a\",123]]"]);
    }

    #[test]
    fn prefix_only_stripped_at_start() {
        let body = "[1]\n3\n)]}'";
        assert_eq!(unwrap_envelope(body), vec!["[1]", ")]}'"]);
    }
}

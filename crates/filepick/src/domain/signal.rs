//! Display-ready messages for rejected input.

use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("valid ANSI escape pattern")
});

/// Remove terminal styling sequences from `text`.
pub fn strip_styling(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Format the message shown when a line of input could not be used.
///
/// Produces `Huh (<input>)?`, or `Huh?` when nothing is left once styling and surrounding
/// whitespace are removed.
pub fn format_error(raw: &str) -> String {
    let stripped = strip_styling(raw);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        "Huh?".to_owned()
    } else {
        format!("Huh ({trimmed})?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_plain_input() {
        assert_eq!(format_error("foo"), "Huh (foo)?");
    }

    #[test]
    fn empty_input_has_no_parentheses() {
        assert_eq!(format_error(""), "Huh?");
        assert_eq!(format_error("   "), "Huh?");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(format_error("  x \t"), "Huh (x)?");
        assert_eq!(format_error(" 1  2 "), "Huh (1  2)?");
    }

    #[test]
    fn strips_color_sequences() {
        assert_eq!(format_error("\x1b[1;32mfoo\x1b[0m"), "Huh (foo)?");
        assert_eq!(format_error("\x1b[31m\x1b[0m"), "Huh?");
    }
}

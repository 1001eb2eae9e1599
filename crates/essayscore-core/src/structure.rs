//! Structural signals.

use crate::normalize::is_strippable;

/// Characters that end a line. `\r\n` splits into a blank piece, which is
/// never counted.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Count lines whose content is not blank.
pub fn count_lines(essay: &str) -> usize {
    essay
        .split(is_line_break)
        .filter(|line| !line.trim_matches(is_strippable).is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_essay_has_no_lines() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("   \n\t\n"), 0);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(count_lines("one\n\ntwo\n   \nthree"), 3);
        assert_eq!(count_lines("single line"), 1);
        assert_eq!(count_lines("one\n\x1f\ntwo"), 2);
    }

    #[test]
    fn windows_and_unicode_line_breaks() {
        assert_eq!(count_lines("one\r\ntwo\r\nthree"), 3);
        assert_eq!(count_lines("one\rtwo"), 2);
        assert_eq!(count_lines("one\u{2028}two\u{85}three"), 3);
    }
}

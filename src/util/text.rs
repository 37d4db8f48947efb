use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, appending `...` when cut.
///
/// Widths too narrow for a character plus the ellipsis keep as many
/// characters as fit. Returns `Cow::Borrowed` when nothing is cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(take_columns(s, max_width).to_string());
    }
    let head = take_columns(s, max_width - ELLIPSIS_WIDTH).trim_end();
    Cow::Owned(format!("{}{}", head, ELLIPSIS))
}

/// Longest prefix of `s` that fits in `width` columns.
fn take_columns(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Tabs and newlines become spaces so a card line stays a single line.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c.is_control()) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' => match chars.peek() {
                // CSI: ESC [ params... final byte in 0x40..=0x7e
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: ESC ] ... terminated by BEL or ESC \
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\t' | '\n' | '\r' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_cjk() {
        assert_eq!(display_width("news"), 4);
        assert_eq!(display_width("新闻"), 4);
    }

    #[test]
    fn test_truncate_fits_borrows() {
        assert!(matches!(truncate_to_width("Short", 10), Cow::Borrowed("Short")));
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_truncate_trims_trailing_space_before_ellipsis() {
        assert_eq!(truncate_to_width("Hello World again", 9), "Hello...");
    }

    #[test]
    fn test_truncate_cjk_respects_columns() {
        assert_eq!(truncate_to_width("新闻新闻新闻", 7), "新闻...");
    }

    #[test]
    fn test_truncate_narrow_widths() {
        assert_eq!(truncate_to_width("Test!", 0), "");
        assert_eq!(truncate_to_width("Test!", 2), "Te");
        assert_eq!(truncate_to_width("Test!", 3), "Tes");
    }

    #[test]
    fn test_strip_clean_text_borrows() {
        assert!(matches!(
            strip_control_chars("Plain headline"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mRed\x1b[0m news"), "Red news");
        assert_eq!(
            strip_control_chars("\x1b]0;pwned\x07Title"),
            "Title"
        );
        assert_eq!(strip_control_chars("\x1b]8;;x\x1b\\Link"), "Link");
    }

    #[test]
    fn test_strip_newlines_become_spaces() {
        assert_eq!(strip_control_chars("Line one\nLine two"), "Line one Line two");
        assert_eq!(strip_control_chars("bell\x07"), "bell");
    }
}

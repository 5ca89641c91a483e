use std::fmt::Write as _;

/// Render `s` as a quoted literal with backslash escapes, e.g. `'a\n'`.
///
/// Single quotes are used unless `s` contains `'` but no `"`.
pub fn repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c => push_code_escape(&mut out, c),
        }
    }
    out.push(quote);
    out
}

fn push_code_escape(out: &mut String, ch: char) {
    let code = ch as u32;
    let _ = if code < 0x100 {
        write!(out, "\\x{:02x}", code)
    } else if code < 0x1_0000 {
        write!(out, "\\u{:04x}", code)
    } else {
        write!(out, "\\U{:08x}", code)
    };
}

fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    if ch.is_control() || ch.is_whitespace() {
        return false;
    }
    !is_format(ch)
}

// Format characters that render invisibly.
fn is_format(ch: char) -> bool {
    matches!(
        ch,
        '\u{00ad}'
            | '\u{061c}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_with_newline() {
        assert_eq!(repr("a\n"), r"'a\n'");
    }

    #[test]
    fn empty_string() {
        assert_eq!(repr(""), "''");
    }

    #[test]
    fn windows_line_ending_and_tabs() {
        assert_eq!(repr("x\ty\r\n"), r"'x\ty\r\n'");
    }

    #[test]
    fn backslashes_are_doubled() {
        assert_eq!(repr(r"C:\data"), r"'C:\\data'");
    }

    #[test]
    fn single_quote_switches_to_double_quotes() {
        assert_eq!(repr("it's\n"), r#""it's\n""#);
    }

    #[test]
    fn both_quotes_keep_single_and_escape() {
        assert_eq!(repr(r#"it's "x""#), r#"'it\'s "x"'"#);
    }

    #[test]
    fn control_and_format_characters_use_code_escapes() {
        assert_eq!(repr("\u{0}\u{1b}\u{7f}"), r"'\x00\x1b\x7f'");
        assert_eq!(repr("\u{a0}\u{ad}"), r"'\xa0\xad'");
        assert_eq!(repr("\u{feff}id"), r"'\ufeffid'");
        assert_eq!(repr("\u{2028}"), r"'\u2028'");
        assert_eq!(repr("\u{e0001}"), r"'\U000e0001'");
    }

    #[test]
    fn printable_unicode_is_kept() {
        assert_eq!(repr("café ☕ 😀\n"), "'café ☕ 😀\\n'");
    }
}

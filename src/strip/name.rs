//! Name eliding for the line under each full-size circle.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Elide `name` to at most `available` display columns, ending with `…`
/// when truncated.
pub fn elide(name: &str, available: usize) -> String {
    if name.width() <= available {
        return name.to_string();
    }
    if available == 0 {
        return String::new();
    }
    let budget = available - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in name.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

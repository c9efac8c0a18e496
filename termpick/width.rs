//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Display width calculations for colored, possibly full-width text.
//!
//! Widths are counted in terminal columns. SGR escape sequences occupy no
//! columns; characters classified as East-Asian Full or Wide occupy two;
//! everything else, combining marks included, occupies one.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Color/style escape sequence: `ESC [ params m`, with `;` or `:`
/// separated parameters.
static ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;:]*m").expect("escape pattern is valid"));

/// Column width of a single character.
pub fn char_width(c: char) -> usize {
    match c.width() {
        Some(2) => 2,
        _ => 1,
    }
}

/// Remove every color/style escape sequence.
pub fn strip_escapes(s: &str) -> String {
    ESCAPE.replace_all(s, "").into_owned()
}

/// Column width of a string, ignoring escape sequences.
pub fn width(s: &str) -> usize {
    strip_escapes(s).chars().map(char_width).sum()
}

/// Longest prefix of `s` that fits in `max_width` columns.
///
/// Escape sequences are kept whole and cost nothing. A wide character
/// that would straddle the limit is dropped instead of being split.
pub fn truncate(s: &str, max_width: usize) -> String {
    let mut result = String::with_capacity(s.len());
    let mut used = 0;
    let mut pos = 0;

    while pos < s.len() {
        if s.as_bytes()[pos] == 0x1b {
            if let Some(m) = ESCAPE.find_at(s, pos).filter(|m| m.start() == pos) {
                result.push_str(m.as_str());
                pos = m.end();
                continue;
            }
        }

        let Some(c) = s[pos..].chars().next() else {
            break;
        };
        let w = char_width(c);
        if used + w > max_width {
            break;
        }
        result.push(c);
        used += w;
        pos += c.len_utf8();
    }

    result
}

/// Truncate to `max_width`, marking the cut with `ellipsis`.
///
/// The result including the ellipsis never exceeds `max_width` columns.
pub fn fit(s: &str, max_width: usize, ellipsis: &str) -> String {
    if width(s) <= max_width {
        return s.to_string();
    }
    let mark = width(ellipsis);
    if mark >= max_width {
        return truncate(ellipsis, max_width);
    }
    let mut out = truncate(s, max_width - mark);
    out.push_str(ellipsis);
    out
}

/// Replace tabs with spaces up to the next multiple of `tabstop`.
/// Escape sequences do not advance the column.
pub fn expand_tabs(s: &str, tabstop: usize) -> String {
    if !s.contains('\t') {
        return s.to_string();
    }
    let tabstop = tabstop.max(1);
    let mut result = String::with_capacity(s.len() + tabstop);
    let mut col = 0;
    let mut pos = 0;

    while pos < s.len() {
        if s.as_bytes()[pos] == 0x1b {
            if let Some(m) = ESCAPE.find_at(s, pos).filter(|m| m.start() == pos) {
                result.push_str(m.as_str());
                pos = m.end();
                continue;
            }
        }

        let Some(c) = s[pos..].chars().next() else {
            break;
        };
        if c == '\t' {
            let fill = tabstop - col % tabstop;
            result.extend(std::iter::repeat(' ').take(fill));
            col += fill;
        } else {
            result.push(c);
            col += char_width(c);
        }
        pos += c.len_utf8();
    }

    result
}

/// Pad on the right with spaces up to `w` columns.
pub fn pad_right(s: &str, w: usize) -> String {
    let fill = w.saturating_sub(width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Pad on the left with spaces up to `w` columns.
pub fn pad_left(s: &str, w: usize) -> String {
    let fill = w.saturating_sub(width(s));
    format!("{}{}", " ".repeat(fill), s)
}

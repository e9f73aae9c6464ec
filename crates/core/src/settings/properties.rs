//! Reader for the line-oriented `key=value` properties format.
//!
//! Supported syntax:
//! - `#` and `!` start comment lines; blank lines are ignored
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line
//! - escapes `\t`, `\n`, `\r`, `\f`, `\uXXXX` (with surrogate pairs) and `\<any>`

use std::str::Chars;

use crate::{CoreError, CoreResult};

/// Parses properties text into `(key, value)` pairs in file order.
///
/// Later duplicates are kept; the caller decides whether they overwrite.
///
/// # Errors
///
/// Returns [`CoreError::InvalidSettings`] for a malformed `\u` escape or a line whose key
/// is blank.
pub fn parse(input: &str) -> CoreResult<Vec<(String, String)>> {
    let mut entries = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_no = index + 1;
        let line = line.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = line.to_owned();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let key = unescape(key, line_no)?;
        if key.trim().is_empty() {
            return Err(invalid(line_no, "property key is blank"));
        }
        entries.push((key, unescape(value, line_no)?));
    }
    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut separator = None;
    for (at, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            separator = Some((at, c));
            break;
        }
    }

    let Some((at, sep)) = separator else {
        return (line, "");
    };
    let mut rest = &line[at + sep.len_utf8()..];
    if is_blank(sep) {
        rest = rest.trim_start_matches(is_blank);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }
    (&line[..at], rest.trim_start_matches(is_blank))
}

fn unescape(raw: &str, line: usize) -> CoreResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn unicode_escape(chars: &mut Chars<'_>, line: usize) -> CoreResult<char> {
    let unit = code_unit(chars, line)?;
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(u32::from(unit))
            .ok_or_else(|| invalid(line, "unpaired surrogate in \\u escape"));
    }
    let low = match (chars.next(), chars.next()) {
        (Some('\\'), Some('u')) => code_unit(chars, line)?,
        _ => return Err(invalid(line, "unpaired surrogate in \\u escape")),
    };
    char::decode_utf16([unit, low])
        .next()
        .and_then(Result::ok)
        .ok_or_else(|| invalid(line, "unpaired surrogate in \\u escape"))
}

fn code_unit(chars: &mut Chars<'_>, line: usize) -> CoreResult<u16> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(line, "malformed \\uxxxx encoding"));
    }
    u16::from_str_radix(&digits, 16).map_err(|_| invalid(line, "malformed \\uxxxx encoding"))
}

fn invalid(line: usize, reason: &str) -> CoreError {
    CoreError::InvalidSettings {
        line,
        reason: reason.to_owned(),
    }
}

//! Parser for `.properties` files.
//!
//! Supports the line-oriented `key=value` format: `=`, `:` or whitespace
//! separators, `#`/`!` comment lines, backslash line continuation and the
//! usual escape sequences (`\t`, `\n`, `\r`, `\f`, `\uXXXX`, `\<char>`).
//! Later duplicates win.

use std::collections::BTreeMap;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Parse properties text into a sorted map.
#[must_use]
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    logical_lines(content)
        .iter()
        .map(|line| split_key_value(line))
        .collect()
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut physical = content.lines();

    while let Some(line) = physical.next() {
        let trimmed = line.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::new();
        let mut current = trimmed;
        loop {
            if !ends_with_continuation(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(current.strip_suffix('\\').unwrap_or(current));
            match physical.next() {
                Some(next) => current = next.trim_start_matches(is_blank),
                None => break,
            }
        }
        lines.push(logical);
    }

    lines
}

fn split_key_value(line: &str) -> (String, String) {
    let mut raw_key = String::new();
    let mut chars = line.chars();
    let mut escaped = false;
    let mut hard_separator = false;

    for c in chars.by_ref() {
        if escaped {
            raw_key.push('\\');
            raw_key.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                hard_separator = true;
                break;
            }
            c if is_blank(c) => break,
            c => raw_key.push(c),
        }
    }

    let remainder = chars.as_str().trim_start_matches(is_blank);
    let raw_value = if hard_separator {
        remainder
    } else {
        remainder
            .strip_prefix(|c: char| c == '=' || c == ':')
            .map_or(remainder, |rest| rest.trim_start_matches(is_blank))
    };

    (unescape(&raw_key), unescape(raw_value))
}

fn unescape(raw: &str) -> String {
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
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

//! Placeholder validity and canonical keys.

const NORWEGIAN_LETTERS: [char; 6] = ['æ', 'ø', 'å', 'Æ', 'Ø', 'Å'];

pub const MAX_TOKEN_CHARS: usize = 99;

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || NORWEGIAN_LETTERS.contains(&c)
}

fn is_word_char(c: char) -> bool {
    is_letter(c) || c.is_ascii_digit() || c == '_'
}

/// Whether `text` (already stripped of markup) can be a placeholder name.
///
/// Allowed characters are letters (Latin plus æøå), digits, whitespace,
/// `_`, `-` and `.`; at least one letter is required and the length must
/// stay below 100 characters.
pub fn is_valid_placeholder(text: &str) -> bool {
    let len = text.chars().count();
    if len == 0 || len > MAX_TOKEN_CHARS {
        return false;
    }
    text.chars()
        .all(|c| is_word_char(c) || c.is_whitespace() || c == '-' || c == '.')
        && text.chars().any(is_letter)
}

fn to_upper(c: char) -> char {
    match c {
        'æ' => 'Æ',
        'ø' => 'Ø',
        'å' => 'Å',
        _ => c.to_ascii_uppercase(),
    }
}

/// Canonical key of a raw placeholder, e.g. `"full name"` -> `"FULL_NAME"`.
///
/// Whitespace and any character outside `[word - .]` become `_`, runs of `_`
/// collapse, leading and trailing `_` are dropped and letters are upper-cased.
pub fn normalize_placeholder(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if is_word_char(c) || c == '-' || c == '.' {
            to_upper(c)
        } else {
            '_'
        };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    if out.ends_with('_') {
        out.pop();
    }
    out
}

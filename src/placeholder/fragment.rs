//! Scanner for bracketed placeholders whose characters are interleaved with markup.
//!
//! A match is `[`, then every character of the key compared case-insensitively,
//! with any number of complete `<...>` tags allowed before and after each
//! character, then `]`. The scanner never backtracks: tags are skipped
//! greedily before each comparison, so a key character of `<` cannot match
//! the start of a tag.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    SeekingOpen,
    MatchingChar(usize),
    SeekingClose,
}

/// Byte ranges of every non-overlapping fragmented occurrence of `[key]` in `xml`.
pub fn find_fragmented(xml: &str, key: &str) -> Vec<Range<usize>> {
    let key: Vec<char> = key.chars().collect();
    let mut found = Vec::new();
    if key.is_empty() {
        return found;
    }

    let mut state = State::SeekingOpen;
    let mut start = 0usize;
    let mut pos = 0usize;
    while pos <= xml.len() {
        match state {
            State::SeekingOpen => match xml[pos..].find('[') {
                Some(off) => {
                    start = pos + off;
                    pos = start + 1;
                    state = State::MatchingChar(0);
                }
                None => break,
            },
            State::MatchingChar(i) => {
                pos = skip_tags(xml, pos);
                match xml[pos..].chars().next() {
                    Some(c) if chars_eq_ignore_case(c, key[i]) => {
                        pos += c.len_utf8();
                        state = if i + 1 == key.len() {
                            State::SeekingClose
                        } else {
                            State::MatchingChar(i + 1)
                        };
                    }
                    _ => {
                        pos = start + 1;
                        state = State::SeekingOpen;
                    }
                }
            }
            State::SeekingClose => {
                pos = skip_tags(xml, pos);
                if xml[pos..].starts_with(']') {
                    pos += 1;
                    found.push(start..pos);
                } else {
                    pos = start + 1;
                }
                state = State::SeekingOpen;
            }
        }
    }
    found
}

/// Replaces every fragmented occurrence of `[key]` with `value`, returning the count.
pub fn replace_fragmented(xml: &str, key: &str, value: &str) -> (String, usize) {
    let ranges = find_fragmented(xml, key);
    if ranges.is_empty() {
        return (xml.to_string(), 0);
    }
    let mut out = String::with_capacity(xml.len());
    let mut last = 0usize;
    for r in &ranges {
        out.push_str(&xml[last..r.start]);
        out.push_str(value);
        last = r.end;
    }
    out.push_str(&xml[last..]);
    (out, ranges.len())
}

/// Skips consecutive complete `<...>` tags starting at `pos`.
fn skip_tags(xml: &str, mut pos: usize) -> usize {
    while xml[pos..].starts_with('<') {
        match xml[pos..].find('>') {
            Some(off) => pos += off + 1,
            None => break,
        }
    }
    pos
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{find_fragmented, replace_fragmented};

    #[test]
    fn matches_across_runs() {
        let xml = "<w:t>[NA</w:t></w:r><w:r><w:t>ME]</w:t>";
        let ranges = find_fragmented(xml, "NAME");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&xml[ranges[0].clone()], "[NA</w:t></w:r><w:r><w:t>ME]");
        let (out, n) = replace_fragmented(xml, "NAME", "Ola");
        assert_eq!(out, "<w:t>Ola</w:t>");
        assert_eq!(n, 1);
    }

    #[test]
    fn tags_allowed_next_to_brackets() {
        let xml = "[<w:t>name</w:t>]";
        assert_eq!(find_fragmented(xml, "NAME"), vec![0..xml.len()]);
    }

    #[test]
    fn case_insensitive_including_norwegian() {
        let xml = "<w:t>[Brø</w:t><w:t>nn] and [BRØNN]</w:t>";
        let (out, n) = replace_fragmented(xml, "BRØNN", "X");
        assert_eq!(n, 2);
        assert_eq!(out, "<w:t>X and X</w:t>");
    }

    #[test]
    fn retries_after_failed_open() {
        let xml = "[[NAME] [NAM] [NAMES] [NAME]";
        let ranges = find_fragmented(xml, "NAME");
        assert_eq!(ranges, vec![1..7, 22..28]);
    }

    #[test]
    fn separators_must_match_literally() {
        assert!(find_fragmented("[full name]", "FULL_NAME").is_empty());
        assert_eq!(find_fragmented("[full_name]", "FULL_NAME").len(), 1);
    }

    #[test]
    fn unterminated_tag_is_not_skipped() {
        assert!(find_fragmented("[NA<w:t ME]", "NAME").is_empty());
        assert!(find_fragmented("[NAME", "NAME").is_empty());
        assert!(find_fragmented("anything", "").is_empty());
    }
}

use tracing::{debug, trace};

use crate::docx::xml::escape_text;
use crate::placeholder::fragment::replace_fragmented;
use crate::placeholder::values::ValueMap;

/// Result of filling one XML part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartSubstitution {
    pub text: String,
    pub replacements: usize,
}

/// Literal spellings of `[key]` tried before fragmented matching.
pub fn spelling_variations(key: &str) -> [String; 6] {
    let spaced = key.replace('_', " ");
    [
        format!("[{key}]"),
        format!("[{}]", key.to_lowercase()),
        format!("[{spaced}]"),
        format!("[{}]", spaced.to_lowercase()),
        format!("[{}]", key.replace('_', "-")),
        format!("[{}]", key.replace('_', ".")),
    ]
}

/// Replaces every recognizable occurrence of each key in `values` with its XML-escaped value.
///
/// Keys are processed in map order. For each key the literal spellings run first,
/// then the fragmented scan picks up occurrences split by markup.
pub fn substitute(xml: &str, values: &ValueMap) -> PartSubstitution {
    let mut text = xml.to_string();
    let mut total = 0usize;

    for (key, value) in values.iter() {
        if key.is_empty() {
            continue;
        }
        let escaped = escape_text(value);

        for variation in spelling_variations(key) {
            let count = text.matches(variation.as_str()).count();
            if count > 0 {
                text = text.replace(variation.as_str(), &escaped);
                total += count;
                trace!(%variation, count, "replaced literal placeholder");
            }
        }

        let (replaced, count) = replace_fragmented(&text, key, &escaped);
        if count > 0 {
            text = replaced;
            total += count;
            debug!(key, count, "replaced fragmented placeholder");
        }
    }

    PartSubstitution {
        text,
        replacements: total,
    }
}

#[cfg(test)]
mod tests {
    use super::{spelling_variations, substitute};
    use crate::placeholder::values::ValueMap;

    fn values(pairs: &[(&str, &str)]) -> ValueMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn replaces_plain_token() {
        let out = substitute("<w:t>Hei [NAME]!</w:t>", &values(&[("NAME", "Ola")]));
        assert_eq!(out.text, "<w:t>Hei Ola!</w:t>");
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn escapes_values() {
        let out = substitute("<w:t>[NAME]</w:t>", &values(&[("NAME", "A & B <c>")]));
        assert_eq!(out.text, "<w:t>A &amp; B &lt;c&gt;</w:t>");
        assert!(!out.text.contains("& "));
    }

    #[test]
    fn tolerates_case_and_separators() {
        let xml = "<w:t>[full name], [FULL-NAME], [Full.Name]? [FULL.NAME]</w:t>";
        let out = substitute(xml, &values(&[("FULL_NAME", "Kari")]));
        assert_eq!(out.text, "<w:t>Kari, Kari, [Full.Name]? Kari</w:t>");
        assert_eq!(out.replacements, 3);
    }

    #[test]
    fn replaces_fragmented_token() {
        let xml = "<w:r><w:t>[NA</w:t></w:r><w:r><w:t>ME] og [NAME]</w:t></w:r>";
        let out = substitute(xml, &values(&[("NAME", "Ola")]));
        assert_eq!(out.text, "<w:r><w:t>Ola og Ola</w:t></w:r>");
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn unknown_keys_leave_text_alone() {
        let xml = "<w:t>[CITY]</w:t>";
        let out = substitute(xml, &values(&[("NAME", "Ola"), ("", "x")]));
        assert_eq!(out.text, xml);
        assert_eq!(out.replacements, 0);
    }

    #[test]
    fn variations_for_key_without_separators() {
        let v = spelling_variations("NAME");
        assert_eq!(v[0], "[NAME]");
        assert_eq!(v[1], "[name]");
        assert_eq!(v[2], "[NAME]");
        assert_eq!(v[3], "[name]");
        assert_eq!(spelling_variations("A_B")[4], "[A-B]");
        assert_eq!(spelling_variations("A_B")[5], "[A.B]");
    }
}

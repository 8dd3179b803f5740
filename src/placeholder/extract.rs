use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::docx::xml::{clean_text, strip_tags};
use crate::placeholder::token::is_valid_placeholder;

/// `[...]` in visible text; non-greedy up to the first `]`.
static CLEAN_BRACKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("clean bracket regex"));

/// `[...]` in raw markup whose interior may be interrupted by tags but holds no other brackets.
static FRAGMENTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^<>\[\]]*(?:<[^>]*>[^<>\[\]]*)*)\]").expect("fragmented bracket regex")
});

/// Anything between `[` and the next `]` in raw markup, tags included.
static LOOSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]*(?:<[^>]*>[^\]]*)*)\]").expect("loose bracket regex")
});

/// Which scan produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExtractPass {
    CleanText,
    Fragmented,
    Loose,
}

/// Runs all three passes over one part and returns the valid raw tokens, trimmed.
pub fn extract_placeholders(xml: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    for pass in [ExtractPass::CleanText, ExtractPass::Fragmented, ExtractPass::Loose] {
        for candidate in scan(xml, pass) {
            if is_valid_placeholder(&candidate) {
                trace!(?pass, token = %candidate, "placeholder candidate");
                found.insert(candidate);
            }
        }
    }
    found
}

/// Raw, unvalidated candidates of a single pass.
pub fn scan(xml: &str, pass: ExtractPass) -> Vec<String> {
    match pass {
        ExtractPass::CleanText => {
            let text = clean_text(xml);
            CLEAN_BRACKET_RE
                .captures_iter(&text)
                .map(|caps| caps[1].trim().to_string())
                .collect()
        }
        ExtractPass::Fragmented => bracket_interiors(&FRAGMENTED_RE, xml),
        ExtractPass::Loose => bracket_interiors(&LOOSE_RE, xml)
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

fn bracket_interiors(re: &Regex, xml: &str) -> Vec<String> {
    re.captures_iter(xml)
        .map(|caps| strip_tags(&caps[1]).trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{extract_placeholders, scan, ExtractPass};

    fn tokens(xml: &str) -> Vec<String> {
        extract_placeholders(xml).into_iter().collect()
    }

    #[test]
    fn finds_plain_tokens() {
        let xml = r#"<w:p><w:r><w:t>Dear [NAME], born [ birth date ].</w:t></w:r></w:p>"#;
        assert_eq!(tokens(xml), vec!["NAME", "birth date"]);
    }

    #[test]
    fn recovers_token_split_across_runs() {
        let xml = r#"<w:p><w:r><w:t>[NA</w:t></w:r><w:proofErr w:type="spellStart"/><w:r><w:rPr><w:b/></w:rPr><w:t>ME]</w:t></w:r></w:p>"#;
        assert_eq!(tokens(xml), vec!["NAME"]);
        assert_eq!(scan(xml, ExtractPass::Fragmented), vec!["NAME"]);
        assert_eq!(scan(xml, ExtractPass::Loose), vec!["NAME"]);
        // The visible text has no break between the fragments.
        assert_eq!(scan(xml, ExtractPass::CleanText), vec!["NAME"]);
    }

    #[test]
    fn fragmented_pass_skips_nested_brackets() {
        let xml = "<w:t>[a [CITY] b]</w:t>";
        assert_eq!(scan(xml, ExtractPass::CleanText), vec!["a [CITY"]);
        assert_eq!(scan(xml, ExtractPass::Fragmented), vec!["CITY"]);
        assert_eq!(tokens(xml), vec!["CITY"]);
    }

    #[test]
    fn rejects_non_placeholders() {
        let xml = "<w:t>[1] [x &amp; y] [] [ ] [a/b] [æøå]</w:t>";
        assert_eq!(tokens(xml), vec!["æøå"]);
    }

    #[test]
    fn empty_part_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens("<w:document><w:body/></w:document>").is_empty());
    }
}

use std::borrow::Cow;

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("ws regex"));

/// Removes every `<...>` tag, keeping the text in between.
pub fn strip_tags(xml: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(xml, "")
}

/// Decodes the five predefined XML entities. Other references are left as-is.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let decoded = [
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&amp;", '&'),
            ("&quot;", '"'),
            ("&apos;", '\''),
        ]
        .into_iter()
        .find(|(ent, _)| rest.starts_with(ent));
        match decoded {
            Some((ent, ch)) => {
                out.push(ch);
                rest = &rest[ent.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Visible text of a part: tags stripped, entities decoded, whitespace collapsed.
pub fn clean_text(xml: &str) -> String {
    let stripped = strip_tags(xml);
    let decoded = decode_entities(&stripped);
    WS_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Escapes `& < > " '` so the value can never introduce markup.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// Walks the whole document with a strict reader; `Err` carries the reader's message.
pub fn check_well_formed(xml: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;

    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(_) => {}
            Err(err) => {
                return Err(format!(
                    "{err} at byte {}",
                    reader.error_position()
                ))
            }
        }
    }
    if depth != 0 {
        return Err(format!("{depth} element(s) left open"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_well_formed, clean_text, decode_entities, escape_text, strip_tags};

    #[test]
    fn clean_text_joins_runs() {
        let xml = r#"<w:p><w:r><w:t>[NA</w:t></w:r>
            <w:r><w:rPr><w:b/></w:rPr><w:t>ME]</w:t></w:r><w:r><w:t xml:space="preserve">  &amp; more</w:t></w:r></w:p>"#;
        assert_eq!(clean_text(xml), "[NA ME] & more");
        assert_eq!(strip_tags("<a>x</a><b/>y"), "xy");
    }

    #[test]
    fn decodes_only_predefined_entities() {
        assert_eq!(
            decode_entities("&lt;a&gt; &quot;b&quot; &apos;c&apos; &amp;amp; &#91; & x"),
            "<a> \"b\" 'c' &amp; &#91; & x"
        );
    }

    #[test]
    fn escape_covers_quotes() {
        assert_eq!(escape_text(r#"A & B <"x"> 'y'"#), "A &amp; B &lt;&quot;x&quot;&gt; &apos;y&apos;");
        assert_eq!(escape_text("Ola"), "Ola");
    }

    #[test]
    fn detects_broken_nesting() {
        assert!(check_well_formed(r#"<?xml version="1.0"?><w:p><w:r><w:t>x</w:t></w:r></w:p>"#).is_ok());
        assert!(check_well_formed("<w:p><w:r><w:t>x</w:r></w:p>").is_err());
        assert!(check_well_formed("<w:p><w:r>").is_err());
    }
}

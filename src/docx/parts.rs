use tracing::debug;

use crate::docx::package::DocxPackage;

/// Parts that can hold visible text, probed in this order.
const FIXED_PARTS: [&str; 12] = [
    "word/document.xml",
    "word/header.xml",
    "word/footer.xml",
    "word/header1.xml",
    "word/footer1.xml",
    "word/header2.xml",
    "word/footer2.xml",
    "word/header3.xml",
    "word/footer3.xml",
    "word/comments.xml",
    "word/endnotes.xml",
    "word/footnotes.xml",
];

pub const DEFAULT_MAX_NUMBERED: u32 = 20;

/// Chooses the XML parts of a package that are scanned for placeholders.
#[derive(Clone, Copy, Debug)]
pub struct PartSelector {
    /// Highest N probed for `word/headerN.xml` / `word/footerN.xml`.
    pub max_numbered: u32,
}

impl Default for PartSelector {
    fn default() -> Self {
        Self {
            max_numbered: DEFAULT_MAX_NUMBERED,
        }
    }
}

impl PartSelector {
    pub fn new(max_numbered: u32) -> Self {
        Self { max_numbered }
    }

    pub fn candidates(&self) -> Vec<String> {
        let mut names: Vec<String> = FIXED_PARTS.iter().map(|s| s.to_string()).collect();
        for i in 1..=self.max_numbered {
            for name in [format!("word/header{i}.xml"), format!("word/footer{i}.xml")] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn select(&self, pkg: &DocxPackage) -> Vec<String> {
        let selected: Vec<String> = self
            .candidates()
            .into_iter()
            .filter(|name| pkg.contains(name))
            .collect();
        debug!(parts = ?selected, "selected xml parts");
        selected
    }
}

/// Text-bearing parts present in `pkg`, using the default selector.
pub fn select_parts(pkg: &DocxPackage) -> Vec<String> {
    PartSelector::default().select(pkg)
}

#[cfg(test)]
mod tests {
    use super::{select_parts, PartSelector};
    use crate::docx::package::tests::build_zip;
    use crate::docx::package::DocxPackage;

    #[test]
    fn selects_present_parts_in_probe_order() {
        let bytes = build_zip(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("word/footnotes.xml", b"<w:footnotes/>"),
            ("word/footer7.xml", b"<w:ftr/>"),
            ("word/document.xml", b"<w:document/>"),
            ("word/header2.xml", b"<w:hdr/>"),
            ("word/styles.xml", b"<w:styles/>"),
            ("word/header21.xml", b"<w:hdr/>"),
        ]);
        let pkg = DocxPackage::from_bytes(&bytes).expect("read");
        assert_eq!(
            select_parts(&pkg),
            vec![
                "word/document.xml",
                "word/header2.xml",
                "word/footnotes.xml",
                "word/footer7.xml",
            ]
        );
    }

    #[test]
    fn empty_selection_is_valid() {
        let bytes = build_zip(&[("docProps/app.xml", b"<Properties/>")]);
        let pkg = DocxPackage::from_bytes(&bytes).expect("read");
        assert!(select_parts(&pkg).is_empty());
    }

    #[test]
    fn candidates_have_no_duplicates() {
        let names = PartSelector::new(20).candidates();
        assert_eq!(names.len(), 12 + 2 * 20 - 6);
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
        assert!(names.contains(&"word/footer20.xml".to_string()));
        assert!(!names.contains(&"word/header21.xml".to_string()));
    }
}

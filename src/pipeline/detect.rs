use std::collections::BTreeSet;

use tracing::debug;

use super::{DetectionReport, PartPlaceholders, PlaceholderEngine};
use crate::docx::package::DocxPackage;
use crate::error::Result;
use crate::placeholder::extract::extract_placeholders;
use crate::placeholder::token::normalize_placeholder;

impl PlaceholderEngine {
    /// Scans every selected part and reports placeholders per part and document-wide.
    pub fn scan(&self, docx: &[u8]) -> Result<DetectionReport> {
        let pkg = DocxPackage::from_bytes(docx)?;
        let mut all: BTreeSet<String> = BTreeSet::new();
        let mut parts = Vec::new();

        for name in self.selector.select(&pkg) {
            let Some(xml) = pkg.part_text(&name) else {
                continue;
            };
            let found: BTreeSet<String> = extract_placeholders(xml)
                .iter()
                .map(|raw| normalize_placeholder(raw))
                .filter(|p| !p.is_empty())
                .collect();
            debug!(part = %name, count = found.len(), "scanned part");
            all.extend(found.iter().cloned());
            parts.push(PartPlaceholders {
                part: name,
                placeholders: found.into_iter().collect(),
            });
        }

        let placeholders: Vec<String> = all.into_iter().collect();
        debug!(count = placeholders.len(), ?placeholders, "detection finished");
        Ok(DetectionReport {
            placeholders,
            parts,
        })
    }

    pub fn detect(&self, docx: &[u8]) -> Result<Vec<String>> {
        Ok(self.scan(docx)?.placeholders)
    }
}

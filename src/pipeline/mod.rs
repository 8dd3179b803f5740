mod detect;
mod fill;
pub mod report;

use crate::docx::parts::PartSelector;
use crate::error::Result;
use crate::placeholder::values::ValueMap;

pub use report::{DetectionReport, FillOutcome, FillReport, FillWarning, PartFill, PartPlaceholders};

/// Drives placeholder detection and filling over whole documents.
///
/// Every call opens its own package from the given bytes, so one engine can
/// serve many documents; nothing is shared between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderEngine {
    selector: PartSelector,
}

impl PlaceholderEngine {
    pub fn new(selector: PartSelector) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &PartSelector {
        &self.selector
    }
}

/// Sorted, distinct normalized placeholders of a .docx given as bytes.
pub fn detect(docx: &[u8]) -> Result<Vec<String>> {
    PlaceholderEngine::default().detect(docx)
}

/// Fills a .docx given as bytes with `values`.
pub fn process(docx: &[u8], values: &ValueMap) -> Result<FillOutcome> {
    PlaceholderEngine::default().process(docx, values)
}

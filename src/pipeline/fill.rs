use tracing::{debug, info, warn};

use super::{FillOutcome, FillReport, FillWarning, PartFill, PlaceholderEngine};
use crate::docx::package::DocxPackage;
use crate::docx::xml::check_well_formed;
use crate::error::Result;
use crate::placeholder::substitute::substitute;
use crate::placeholder::values::ValueMap;

impl PlaceholderEngine {
    /// Substitutes `values` into every selected part and re-serializes the package.
    ///
    /// Zero replacements is reported as a warning, never as an error.
    pub fn process(&self, docx: &[u8], values: &ValueMap) -> Result<FillOutcome> {
        let mut pkg = DocxPackage::from_bytes(docx)?;
        let mut report = FillReport::default();

        for name in self.selector.select(&pkg) {
            let Some(original) = pkg.part_text(&name) else {
                continue;
            };
            let filled = substitute(original, values);
            let changed = filled.text != original;

            if changed {
                if let (Ok(()), Err(reason)) =
                    (check_well_formed(original), check_well_formed(&filled.text))
                {
                    warn!(part = %name, %reason, "filled part is not well-formed");
                    report.warnings.push(FillWarning::MalformedPart {
                        part: name.clone(),
                        reason,
                    });
                }
                pkg.replace_part(&name, filled.text);
            }

            debug!(part = %name, replacements = filled.replacements, changed, "filled part");
            report.total_replacements += filled.replacements;
            report.parts.push(PartFill {
                part: name,
                replacements: filled.replacements,
                changed,
            });
        }

        if report.total_replacements == 0 {
            warn!("no placeholders were replaced");
            report.warnings.push(FillWarning::NoReplacements);
        }

        let bytes = pkg.to_bytes()?;
        info!(
            replacements = report.total_replacements,
            parts = pkg.replaced_parts().count(),
            "document filled"
        );
        Ok(FillOutcome { bytes, report })
    }
}

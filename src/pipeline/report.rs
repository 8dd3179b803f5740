use std::fmt;

use serde::Serialize;

/// Placeholders found in one XML part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartPlaceholders {
    pub part: String,
    pub placeholders: Vec<String>,
}

/// Outcome of a detection pass over a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    /// Document-wide normalized placeholders, sorted.
    pub placeholders: Vec<String>,
    pub parts: Vec<PartPlaceholders>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartFill {
    pub part: String,
    pub replacements: usize,
    pub changed: bool,
}

/// Non-fatal conditions raised while filling a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillWarning {
    /// Nothing was replaced anywhere in the document.
    NoReplacements,
    /// A part parsed cleanly before substitution but not after.
    MalformedPart { part: String, reason: String },
}

impl fmt::Display for FillWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillWarning::NoReplacements => write!(
                f,
                "no placeholders were replaced; they may be missing or split in the document"
            ),
            FillWarning::MalformedPart { part, reason } => {
                write!(f, "{part} is no longer well-formed after filling: {reason}")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub parts: Vec<PartFill>,
    pub total_replacements: usize,
    pub warnings: Vec<FillWarning>,
}

impl FillReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Filled package bytes plus what happened while producing them.
#[derive(Clone, Debug)]
pub struct FillOutcome {
    pub bytes: Vec<u8>,
    pub report: FillReport,
}

//! Detection and filling of bracketed `[PLACEHOLDER]` tokens inside .docx packages.
//!
//! The engine works directly on the XML parts of the zip container. Tokens
//! may be split across runs by the word processor; detection and
//! substitution both tolerate markup interleaved with the token text.
//!
//! ```no_run
//! use docx_fill::{detect, process, ValueMap};
//!
//! let bytes = std::fs::read("letter.docx")?;
//! let placeholders = detect(&bytes)?;
//! let values: ValueMap = placeholders.iter().map(|p| (p.clone(), "x".to_string())).collect();
//! let filled = process(&bytes, &values)?;
//! std::fs::write("GENERATED_letter.docx", filled.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod docx;
pub mod error;
pub mod pipeline;
pub mod placeholder;

pub use docx::package::{DocxPackage, DOCX_MEDIA_TYPE};
pub use docx::parts::{select_parts, PartSelector};
pub use error::{FillError, Result};
pub use pipeline::{detect, process, DetectionReport, FillOutcome, FillReport, FillWarning, PlaceholderEngine};
pub use placeholder::{normalize_placeholder, ValueMap};

//! Error types for reading, filling and writing .docx packages.
use thiserror::Error;

/// Result type for package operations.
pub type Result<T> = std::result::Result<T, FillError>;

#[derive(Error, Debug)]
pub enum FillError {
    /// The input bytes are not a zip container.
    #[error("could not read the document; ensure it is a valid .docx package")]
    Read(#[source] zip::result::ZipError),

    /// An entry of the container could not be decompressed.
    #[error("could not read the document entry {name}; ensure it is a valid .docx package")]
    ReadEntry {
        name: String,
        #[source]
        source: ReadEntryError,
    },

    /// Starting an entry in the output container failed.
    #[error("could not write document entry {name}")]
    Write {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Finalizing the output container failed.
    #[error("could not finish the output package")]
    Finish(#[source] zip::result::ZipError),

    #[error("io error while writing the output package: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ReadEntryError {
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FillError {
    /// True when the input could not be read as a package at all.
    pub fn is_read_error(&self) -> bool {
        matches!(self, FillError::Read(_) | FillError::ReadEntry { .. })
    }
}

use std::io::{Cursor, Read, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{FillError, ReadEntryError, Result};

/// Media type of a word-processing package, used when handing out filled documents.
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// In-memory part table of a .docx container.
///
/// Entries keep their original order and zip metadata so that a re-serialized
/// package only differs in the parts that were replaced.
pub struct DocxPackage {
    entries: Vec<DocxEntry>,
}

pub struct DocxEntry {
    pub name: String,
    pub data: Vec<u8>,
    pub compression: CompressionMethod,
    pub last_modified: zip::DateTime,
    pub unix_mode: Option<u32>,
    pub is_dir: bool,
    replaced: bool,
}

impl DocxPackage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut zip = ZipArchive::new(Cursor::new(bytes)).map_err(FillError::Read)?;
        let mut entries = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let mut file = zip.by_index(i).map_err(|e| FillError::ReadEntry {
                name: format!("#{i}"),
                source: ReadEntryError::Zip(e),
            })?;
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| FillError::ReadEntry {
                    name: name.clone(),
                    source: ReadEntryError::Io(e),
                })?;
            entries.push(DocxEntry {
                compression: file.compression(),
                last_modified: file.last_modified().unwrap_or_default(),
                unix_mode: file.unix_mode(),
                is_dir: file.is_dir(),
                name,
                data,
                replaced: false,
            });
        }
        debug!(entries = entries.len(), "opened package");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DocxEntry] {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    fn entry(&self, name: &str) -> Option<&DocxEntry> {
        self.entries.iter().find(|e| !e.is_dir && e.name == name)
    }

    /// Text of a part, or `None` when the part is missing or not UTF-8.
    pub fn part_text(&self, name: &str) -> Option<&str> {
        let ent = self.entry(name)?;
        match std::str::from_utf8(&ent.data) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!(part = name, error = %err, "part is not utf-8; skipping");
                None
            }
        }
    }

    /// Overwrites the content of an existing part. Returns false when no such part exists.
    pub fn replace_part(&mut self, name: &str, text: String) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| !e.is_dir && e.name == name)
        {
            Some(ent) => {
                ent.data = text.into_bytes();
                ent.replaced = true;
                true
            }
            None => false,
        }
    }

    pub fn replaced_parts(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.replaced)
            .map(|e| e.name.as_str())
    }

    /// Serializes the package back into a zip container.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zout = ZipWriter::new(Cursor::new(Vec::new()));
        for ent in &self.entries {
            let mut opts = SimpleFileOptions::default()
                .compression_method(ent.compression)
                .last_modified_time(ent.last_modified);
            if let Some(mode) = ent.unix_mode {
                opts = opts.unix_permissions(mode);
            }
            if ent.is_dir || ent.name.ends_with('/') {
                zout.add_directory(ent.name.as_str(), opts)
                    .map_err(|source| FillError::Write {
                        name: ent.name.clone(),
                        source,
                    })?;
            } else {
                zout.start_file(ent.name.as_str(), opts)
                    .map_err(|source| FillError::Write {
                        name: ent.name.clone(),
                        source,
                    })?;
                zout.write_all(&ent.data)?;
            }
        }
        let cursor = zout.finish().map_err(FillError::Finish)?;
        Ok(cursor.into_inner())
    }
}

//! Abstractions for section retrieval to enable testing and mocking.
//!
//! The `SectionSource` trait lets the extractor work with sections saved on
//! disk by a retrieval tool, or with in-memory fixtures in tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::{DiagnosticSection, ExtractError, SectionKind};

/// Abstraction over where section text comes from.
pub trait SectionSource: Send + Sync {
    /// Reads the raw text of a section.
    ///
    /// # Returns
    /// `Ok(None)` when the bundle does not carry the section, or an I/O error
    /// when the section exists but cannot be read.
    fn read_section(&self, kind: SectionKind) -> io::Result<Option<String>>;

    /// Reads a section and wraps it as a [`DiagnosticSection`].
    fn section(&self, kind: SectionKind) -> Result<Option<DiagnosticSection>, ExtractError> {
        self.read_section(kind)
            .map(|text| text.map(|t| DiagnosticSection::new(kind, t)))
            .map_err(|e| ExtractError::Source {
                kind,
                message: e.to_string(),
            })
    }
}

/// Sections stored as files in one bundle directory.
///
/// A section is looked up as `<dir>/<stem>.xml`, `<dir>/<stem>.txt`, then
/// `<dir>/<stem>`, where the stem comes from [`SectionKind::stem`]. Bytes
/// that are not valid UTF-8 are replaced with U+FFFD.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    const EXTENSIONS: [&'static str; 3] = ["xml", "txt", ""];

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, kind: SectionKind) -> impl Iterator<Item = PathBuf> + '_ {
        Self::EXTENSIONS.iter().map(move |ext| {
            if ext.is_empty() {
                self.root.join(kind.stem())
            } else {
                self.root.join(format!("{}.{}", kind.stem(), ext))
            }
        })
    }
}

impl SectionSource for DirSource {
    fn read_section(&self, kind: SectionKind) -> io::Result<Option<String>> {
        for path in self.candidates(kind) {
            match std::fs::read(&path) {
                Ok(bytes) => return Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

/// In-memory sections for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    sections: HashMap<SectionKind, String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a section.
    pub fn add_section(&mut self, kind: SectionKind, text: impl Into<String>) {
        self.sections.insert(kind, text.into());
    }

    /// Removes a section, simulating a bundle that does not carry it.
    pub fn remove_section(&mut self, kind: SectionKind) {
        self.sections.remove(&kind);
    }
}

impl SectionSource for MockSource {
    fn read_section(&self, kind: SectionKind) -> io::Result<Option<String>> {
        Ok(self.sections.get(&kind).cloned())
    }
}

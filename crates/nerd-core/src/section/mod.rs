//! ASUP diagnostic sections.
//!
//! A bundle is a set of named text sections fetched for one controller. The
//! core never fetches anything itself: a [`SectionSource`] hands over the
//! decoded text, and every extractor works on a borrowed `&str`.
//!
//! ```text
//! ┌──────────────┐   read_section(kind)   ┌──────────────────┐
//! │  Extractor   │ ─────────────────────▶ │  SectionSource   │ (trait)
//! └──────────────┘                        └────────┬─────────┘
//!                                   ┌──────────────┴─────────────┐
//!                             ┌─────▼─────┐                ┌─────▼──────┐
//!                             │ DirSource │                │ MockSource │
//!                             │ (files)   │                │ (fixtures) │
//!                             └───────────┘                └────────────┘
//! ```

pub(crate) mod scenarios;
pub mod source;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use source::{DirSource, MockSource, SectionSource};

/// Named sub-report of an ASUP bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    /// Controller overview (host, cluster, model, warranty).
    Overview,
    /// RAID configuration dump (`sysconfig -r`).
    SysconfigR,
    /// Weekly aggregate space history (`df -A`).
    DfA,
    /// Aggregate object view (allocated size, used %, RAID type).
    AggregateObject,
    /// System-wide counters (ops and CPU busy samples).
    SystemCounters,
    /// Per-volume counter statistics.
    VolumeCounters,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Overview,
        SectionKind::SysconfigR,
        SectionKind::DfA,
        SectionKind::AggregateObject,
        SectionKind::SystemCounters,
        SectionKind::VolumeCounters,
    ];

    /// File stem used when sections are stored on disk.
    pub fn stem(self) -> &'static str {
        match self {
            SectionKind::Overview => "overview",
            SectionKind::SysconfigR => "SYSCONFIG-R",
            SectionKind::DfA => "DF-A",
            SectionKind::AggregateObject => "AGGREGATE",
            SectionKind::SystemCounters => "system-counters",
            SectionKind::VolumeCounters => "volume-counters",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Raw text of one section. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSection {
    pub kind: SectionKind,
    pub text: String,
}

impl DiagnosticSection {
    pub fn new(kind: SectionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Returns the text of a present, non-blank section or `MissingSection`.
pub fn require(
    section: Option<&DiagnosticSection>,
    kind: SectionKind,
) -> Result<&str, ExtractError> {
    match section {
        Some(s) if !s.is_blank() => Ok(&s.text),
        _ => Err(ExtractError::MissingSection(kind)),
    }
}

/// Error type for extraction failures.
///
/// Only `Source` is a hard failure; `MissingSection` is the expected
/// "no data" outcome for sections a bundle does not carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The section is absent, blank, or lacks its payload markers.
    MissingSection(SectionKind),
    /// The section source failed for a reason other than absence.
    Source { kind: SectionKind, message: String },
}

impl ExtractError {
    pub fn is_missing(&self) -> bool {
        matches!(self, ExtractError::MissingSection(_))
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingSection(kind) => write!(f, "section {} not available", kind),
            ExtractError::Source { kind, message } => {
                write!(f, "failed to read section {}: {}", kind, message)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_blank_is_missing() {
        let blank = DiagnosticSection::new(SectionKind::DfA, "  \n\t ");
        assert_eq!(
            require(Some(&blank), SectionKind::DfA),
            Err(ExtractError::MissingSection(SectionKind::DfA))
        );
        assert_eq!(
            require(None, SectionKind::DfA),
            Err(ExtractError::MissingSection(SectionKind::DfA))
        );

        let present = DiagnosticSection::new(SectionKind::DfA, "<![CDATA[x]]>");
        assert_eq!(require(Some(&present), SectionKind::DfA), Ok("<![CDATA[x]]>"));
    }

    #[test]
    fn test_error_display() {
        let err = ExtractError::MissingSection(SectionKind::SysconfigR);
        assert_eq!(err.to_string(), "section SYSCONFIG-R not available");
        assert!(err.is_missing());

        let err = ExtractError::Source {
            kind: SectionKind::Overview,
            message: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read section overview: permission denied"
        );
        assert!(!err.is_missing());
    }
}

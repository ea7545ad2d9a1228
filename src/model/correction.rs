//! Audit records for label corrections.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SectionType;

/// Why a page label was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionReason {
    /// The page differed from two agreeing neighbors
    IsolatedPageCorrection,
    /// The page was `unknown` and took the nearest known label
    UnknownResolution,
}

impl CorrectionReason {
    /// Stable name used in logs and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionReason::IsolatedPageCorrection => "isolated_page_correction",
            CorrectionReason::UnknownResolution => "unknown_resolution",
        }
    }
}

impl fmt::Display for CorrectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single label change made by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Page index (0-based)
    pub page_index: usize,

    /// Label before the change
    pub from: SectionType,

    /// Label after the change
    pub to: SectionType,

    /// Rule that made the change
    pub reason: CorrectionReason,
}

impl Correction {
    /// Create a correction record.
    pub fn new(
        page_index: usize,
        from: SectionType,
        to: SectionType,
        reason: CorrectionReason,
    ) -> Self {
        Self {
            page_index,
            from,
            to,
            reason,
        }
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {}: {} -> {} ({})",
            self.page_index + 1,
            self.from,
            self.to,
            self.reason
        )
    }
}

/// Correction counts per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionSummary {
    /// Isolated pages rewritten
    pub isolated_page_corrections: usize,

    /// Unknown pages resolved
    pub unknown_resolutions: usize,
}

impl CorrectionSummary {
    /// Tally a list of corrections.
    pub fn from_corrections(corrections: &[Correction]) -> Self {
        let mut summary = Self::default();
        for correction in corrections {
            match correction.reason {
                CorrectionReason::IsolatedPageCorrection => summary.isolated_page_corrections += 1,
                CorrectionReason::UnknownResolution => summary.unknown_resolutions += 1,
            }
        }
        summary
    }

    /// Total number of corrections.
    pub fn total(&self) -> usize {
        self.isolated_page_corrections + self.unknown_resolutions
    }
}

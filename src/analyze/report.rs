//! Analysis report with per-page details and the final section map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::PageClassification;
use crate::error::Result;
use crate::matcher::MatchAlgorithm;
use crate::model::{Correction, CorrectionSummary, SectionMap, SectionType, SplitTarget};
use crate::reconcile::ContinuityError;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Everything known about one document run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of pages analyzed
    pub page_count: usize,

    /// Matching algorithm used
    pub algorithm: MatchAlgorithm,

    /// Per-page classification details
    pub pages: Vec<PageClassification>,

    /// Labels straight from the classifier
    pub raw_labels: Vec<SectionType>,

    /// Labels after reconciliation
    pub labels: Vec<SectionType>,

    /// Continuity errors found in the raw labels
    pub errors: Vec<ContinuityError>,

    /// Changes made by the reconciler
    pub corrections: Vec<Correction>,

    /// Correction counts per reason
    pub summary: CorrectionSummary,

    /// Final page grouping
    pub sections: SectionMap,

    /// No page could be classified; every page fell back to `front`
    pub degenerate: bool,

    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Output files for the PDF writer.
    pub fn split_plan(&self) -> Vec<SplitTarget> {
        self.sections.split_plan()
    }

    /// Sections the document appears to lack.
    pub fn missing_sections(&self) -> Vec<SectionType> {
        self.sections.missing_sections()
    }

    /// Pages whose OCR failed.
    pub fn ocr_failures(&self) -> Vec<usize> {
        self.pages
            .iter()
            .filter(|p| p.ocr_error.is_some())
            .map(|p| p.page.index)
            .collect()
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self)?,
            JsonFormat::Compact => serde_json::to_string(self)?,
        };
        Ok(json)
    }
}

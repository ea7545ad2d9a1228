//! Detection of pages that break section continuity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::SectionType;

/// Confidence assigned to every isolated-page finding.
pub const ISOLATED_PAGE_CONFIDENCE: f32 = 0.8;

/// A page whose label breaks the run it sits in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContinuityError {
    /// The page differs from both neighbors, which agree with each other.
    IsolatedPage {
        /// Page index (0-based)
        page_index: usize,
        /// Label the page currently has
        current: SectionType,
        /// Label of both neighbors
        surrounding: SectionType,
        /// How sure the rule is
        confidence: f32,
    },
}

impl ContinuityError {
    /// Page the error is about.
    pub fn page_index(&self) -> usize {
        match self {
            ContinuityError::IsolatedPage { page_index, .. } => *page_index,
        }
    }

    /// Confidence of the finding.
    pub fn confidence(&self) -> f32 {
        match self {
            ContinuityError::IsolatedPage { confidence, .. } => *confidence,
        }
    }

    /// Label the page should take if corrected.
    pub fn suggested(&self) -> SectionType {
        match self {
            ContinuityError::IsolatedPage { surrounding, .. } => *surrounding,
        }
    }
}

impl fmt::Display for ContinuityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuityError::IsolatedPage {
                page_index,
                current,
                surrounding,
                confidence,
            } => write!(
                f,
                "page {} is surrounded by {} but classified as {} (confidence {:.1})",
                page_index + 1,
                surrounding,
                current,
                confidence
            ),
        }
    }
}

/// Find isolated pages in a label sequence.
///
/// The first and last page are never reported since they have only one
/// neighbor. Two `unknown` neighbors also count as a run; the page is then
/// suggested `unknown` and left to unknown resolution.
pub fn find_isolated_pages(labels: &[SectionType]) -> Vec<ContinuityError> {
    labels
        .windows(3)
        .enumerate()
        .filter_map(|(offset, w)| {
            let (prev, current, next) = (w[0], w[1], w[2]);
            (current != prev && prev == next).then_some(
                ContinuityError::IsolatedPage {
                    page_index: offset + 1,
                    current,
                    surrounding: prev,
                    confidence: ISOLATED_PAGE_CONFIDENCE,
                },
            )
        })
        .collect()
}

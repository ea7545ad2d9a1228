//! Continuity reconciliation of raw page labels.
//!
//! Patent sections occupy contiguous page ranges, so a single page whose
//! label disagrees with two agreeing neighbors is almost always an OCR
//! misread. The [`Reconciler`] rewrites such pages, then gives every page
//! still labeled `unknown` the nearest known label. Runs of two or more
//! disagreeing pages are left alone and treated as real section boundaries.
//!
//! # Example
//!
//! ```
//! use patsplit::model::SectionType::*;
//! use patsplit::reconcile::Reconciler;
//!
//! let outcome = Reconciler::default().reconcile(&[Front, Front, Claims, Front, Front]);
//! assert_eq!(outcome.labels, vec![Front; 5]);
//! assert_eq!(outcome.corrections.len(), 1);
//! ```

mod continuity;

pub use continuity::{find_isolated_pages, ContinuityError, ISOLATED_PAGE_CONFIDENCE};

use serde::{Deserialize, Serialize};

use crate::classify::ClassifierOptions;
use crate::error::Result;
use crate::model::{Correction, CorrectionReason, CorrectionSummary, SectionMap, SectionType};

/// Options for the reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    /// Whether isolated-page corrections are applied
    pub continuity: bool,

    /// Minimum confidence for a correction to be applied
    pub correction_threshold: f32,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            continuity: true,
            correction_threshold: 0.7,
        }
    }
}

impl From<&ClassifierOptions> for ReconcileOptions {
    fn from(options: &ClassifierOptions) -> Self {
        Self {
            continuity: options.continuity,
            correction_threshold: options.correction_threshold,
        }
    }
}

/// Result of reconciling a raw label sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Corrected labels, same length as the input, never `unknown`
    pub labels: Vec<SectionType>,

    /// Continuity errors found in the raw labels, in page order
    pub errors: Vec<ContinuityError>,

    /// Changes made, in the order they were applied
    pub corrections: Vec<Correction>,
}

impl Reconciliation {
    /// Correction counts per reason.
    pub fn summary(&self) -> CorrectionSummary {
        CorrectionSummary::from_corrections(&self.corrections)
    }

    /// Group the corrected labels into sections.
    pub fn section_map(&self) -> Result<SectionMap> {
        SectionMap::from_labels(&self.labels)
    }
}

/// Corrects raw page labels using positional continuity.
///
/// This is a pure function of its input: the raw sequence is not modified
/// and a new corrected sequence is returned.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    /// Create a reconciler with the given options.
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Reconcile a raw label sequence.
    pub fn reconcile(&self, raw: &[SectionType]) -> Reconciliation {
        let errors = find_isolated_pages(raw);
        for error in &errors {
            log::debug!("{}", error);
        }

        let mut labels = raw.to_vec();
        let mut corrections = Vec::new();

        if self.options.continuity {
            self.apply_corrections(&mut labels, &errors, &mut corrections);
        }
        resolve_unknown(&mut labels, &mut corrections);

        let outcome = Reconciliation {
            labels,
            errors,
            corrections,
        };
        let summary = outcome.summary();
        if summary.total() > 0 {
            log::info!(
                "{} corrections ({} isolated pages, {} unknown pages)",
                summary.total(),
                summary.isolated_page_corrections,
                summary.unknown_resolutions
            );
        }
        outcome
    }

    fn apply_corrections(
        &self,
        labels: &mut [SectionType],
        errors: &[ContinuityError],
        corrections: &mut Vec<Correction>,
    ) {
        let mut ordered: Vec<&ContinuityError> = errors.iter().collect();
        ordered.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));

        for error in ordered {
            if error.confidence() < self.options.correction_threshold {
                continue;
            }
            let index = error.page_index();
            let from = labels[index];
            let to = error.suggested();
            if from == to {
                continue;
            }

            labels[index] = to;
            let correction =
                Correction::new(index, from, to, CorrectionReason::IsolatedPageCorrection);
            log::debug!("{}", correction);
            corrections.push(correction);
        }
    }
}

/// Give each `unknown` page the nearest preceding known label, else the
/// nearest following one, else `front`.
fn resolve_unknown(labels: &mut [SectionType], corrections: &mut Vec<Correction>) {
    if !labels.is_empty() && labels.iter().all(SectionType::is_unknown) {
        log::warn!(
            "No page of {} could be classified, defaulting all to front",
            labels.len()
        );
    }

    for index in 0..labels.len() {
        if !labels[index].is_unknown() {
            continue;
        }

        let known = |l: &&SectionType| !l.is_unknown();
        let resolved = labels[..index]
            .iter()
            .rev()
            .find(known)
            .or_else(|| labels[index + 1..].iter().find(known))
            .copied()
            .unwrap_or(SectionType::Front);

        labels[index] = resolved;
        let correction = Correction::new(
            index,
            SectionType::Unknown,
            resolved,
            CorrectionReason::UnknownResolution,
        );
        log::debug!("{}", correction);
        corrections.push(correction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionType::*;

    #[test]
    fn test_isolated_page_corrected() {
        let outcome = Reconciler::default().reconcile(&[Front, Front, Claims, Front, Front]);
        assert_eq!(outcome.labels, vec![Front; 5]);
        assert_eq!(
            outcome.corrections,
            vec![Correction::new(
                2,
                Claims,
                Front,
                CorrectionReason::IsolatedPageCorrection
            )]
        );
    }

    #[test]
    fn test_unknown_takes_previous_label() {
        let raw = [
            Front,
            Front,
            Front,
            Claims,
            Claims,
            Unknown,
            Descriptions,
            Descriptions,
            Drawings,
            Drawings,
        ];
        let outcome = Reconciler::default().reconcile(&raw);
        assert_eq!(outcome.labels[5], Claims);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.summary().unknown_resolutions, 1);
    }

    #[test]
    fn test_leading_unknown_takes_next_label() {
        let outcome = Reconciler::default().reconcile(&[Unknown, Unknown, Claims, Claims]);
        assert_eq!(outcome.labels, vec![Claims; 4]);
        assert_eq!(outcome.summary().unknown_resolutions, 2);
    }

    #[test]
    fn test_all_unknown_defaults_to_front() {
        let outcome = Reconciler::default().reconcile(&[Unknown; 4]);
        assert_eq!(outcome.labels, vec![Front; 4]);
    }

    #[test]
    fn test_isolated_unknown_fixed_by_continuity() {
        let outcome = Reconciler::default().reconcile(&[Claims, Unknown, Claims]);
        assert_eq!(outcome.labels, vec![Claims; 3]);
        assert_eq!(
            outcome.corrections[0].reason,
            CorrectionReason::IsolatedPageCorrection
        );
        assert_eq!(outcome.summary().unknown_resolutions, 0);
    }

    #[test]
    fn test_page_between_unknowns_resolved_backward() {
        let outcome = Reconciler::default().reconcile(&[Claims, Unknown, Drawings, Unknown, Claims]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.labels, vec![Claims; 5]);
        assert_eq!(
            outcome.corrections[0],
            Correction::new(2, Drawings, Unknown, CorrectionReason::IsolatedPageCorrection)
        );
        assert_eq!(outcome.summary().unknown_resolutions, 3);
    }

    #[test]
    fn test_only_known_page_between_unknowns_falls_back_to_front() {
        let outcome = Reconciler::default().reconcile(&[Unknown, Claims, Unknown]);
        assert_eq!(outcome.labels, vec![Front; 3]);
    }

    #[test]
    fn test_continuity_disabled_keeps_isolated_page() {
        let reconciler = Reconciler::new(ReconcileOptions {
            continuity: false,
            ..Default::default()
        });
        let outcome = reconciler.reconcile(&[Front, Claims, Front, Unknown]);
        assert_eq!(outcome.labels, vec![Front, Claims, Front, Front]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.summary().isolated_page_corrections, 0);
    }

    #[test]
    fn test_threshold_above_confidence_skips_correction() {
        let reconciler = Reconciler::new(ReconcileOptions {
            continuity: true,
            correction_threshold: 0.9,
        });
        let outcome = reconciler.reconcile(&[Front, Claims, Front]);
        assert_eq!(outcome.labels, vec![Front, Claims, Front]);
    }

    #[test]
    fn test_two_page_run_kept() {
        let raw = [Claims, Claims, Front, Front, Claims, Claims];
        let outcome = Reconciler::default().reconcile(&raw);
        assert_eq!(outcome.labels, raw.to_vec());
        assert!(outcome.corrections.is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        let outcome = Reconciler::default().reconcile(&[]);
        assert!(outcome.labels.is_empty());
        assert!(outcome.corrections.is_empty());
    }
}

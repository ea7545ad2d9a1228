//! # patsplit
//!
//! Section classification for scanned patent PDFs.
//!
//! Every page is assigned to one of four sections (front page, claims,
//! description, drawings) from the OCR'd text of its header region. Raw
//! labels are then reconciled using the fact that each section is one
//! contiguous page range, and grouped into a [`SectionMap`] ready for
//! splitting the PDF.
//!
//! ## Quick Start
//!
//! ```
//! use patsplit::{analyze_headers, ClassifierOptions};
//!
//! fn main() -> patsplit::Result<()> {
//!     let headers = vec![
//!         vec!["国家知识产权局".to_string()],
//!         vec!["权利要求书".to_string(), "1/1页".to_string()],
//!         vec!["说明书".to_string(), "1/2页".to_string()],
//!         vec!["说明书附图".to_string()],
//!     ];
//!
//!     let report = analyze_headers(&headers, ClassifierOptions::default())?;
//!     assert_eq!(report.sections.claims, vec![1]);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Header extraction**: render a page, crop its top, OCR it
//!   ([`classify::HeaderExtractor`] over the [`PageRenderer`] and
//!   [`OcrEngine`] collaborator traits)
//! - **Matching**: positional ("v2") or fuzzy ("v3") keyword matching
//!   ([`matcher`])
//! - **Classification**: one raw label per page ([`PageClassifier`])
//! - **Reconciliation**: isolated-page correction and `unknown`
//!   resolution ([`Reconciler`])
//! - **Section ranges**: page indices per section ([`SectionMap`])

pub mod analyze;
pub mod classify;
pub mod error;
pub mod matcher;
pub mod model;
pub mod reconcile;

// Re-export commonly used types
pub use analyze::{AnalysisReport, HeaderDump, JsonFormat, PatentAnalyzer};
pub use classify::{
    ClassifierOptions, HeaderExtractor, OcrEngine, PageClassification, PageClassifier,
    PageRenderer,
};
pub use error::{Error, Result};
pub use matcher::{KeywordSet, MatchAlgorithm, MatchResult, MatchStrategy};
pub use model::{
    Correction, CorrectionReason, HeaderPage, OcrLine, PageImage, SectionMap, SectionType,
    SplitTarget,
};
pub use reconcile::{ReconcileOptions, Reconciler, Reconciliation};

use std::path::Path;

/// Analyze pre-recognized page headers.
///
/// # Arguments
///
/// * `headers` - OCR fragments of each page's header region, in page order
/// * `options` - Classifier options
pub fn analyze_headers(
    headers: &[Vec<String>],
    options: ClassifierOptions,
) -> Result<AnalysisReport> {
    let analyzer = PatentAnalyzer::new(options)?;
    analyzer.analyze_dump(&HeaderDump::new(headers.to_vec()))
}

/// Analyze a JSON header dump file.
///
/// # Example
///
/// ```no_run
/// use patsplit::{analyze_file, ClassifierOptions};
///
/// let report = analyze_file("headers.json", ClassifierOptions::default()).unwrap();
/// for target in report.split_plan() {
///     println!("{} <- {:?}", target.file_name, target.page_numbers());
/// }
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P, options: ClassifierOptions) -> Result<AnalysisReport> {
    let dump = HeaderDump::from_path(path)?;
    PatentAnalyzer::new(options)?.analyze_dump(&dump)
}

/// Reconcile raw labels with default options and group them by section.
///
/// # Example
///
/// ```
/// use patsplit::{split_labels, SectionType::*};
///
/// let map = split_labels(&[Front, Front, Claims, Front, Front]);
/// assert_eq!(map.front, vec![0, 1, 2, 3, 4]);
/// assert!(map.claims.is_empty());
/// ```
pub fn split_labels(raw: &[SectionType]) -> SectionMap {
    let outcome = Reconciler::default().reconcile(raw);
    // Reconciled labels never contain `unknown`
    SectionMap::from_labels(&outcome.labels).unwrap_or_default()
}

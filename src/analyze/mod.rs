//! End-to-end document analysis.
//!
//! Ties the classifier, the reconciler and the section range builder
//! together. Pages are classified first (optionally in parallel); only once
//! the full raw label sequence exists is it reconciled and grouped.

mod input;
mod report;

pub use input::HeaderDump;
pub use report::{AnalysisReport, JsonFormat};

use std::sync::Arc;

use chrono::Utc;

use crate::classify::{
    ClassifierOptions, HeaderExtractor, OcrEngine, PageClassification, PageClassifier,
    PageRenderer,
};
use crate::error::Result;
use crate::model::SectionType;
use crate::reconcile::{ReconcileOptions, Reconciler};

/// Classifies and reconciles every page of a patent document.
#[derive(Debug)]
pub struct PatentAnalyzer {
    classifier: PageClassifier,
    reconciler: Reconciler,
}

impl PatentAnalyzer {
    /// Create an analyzer; fails on invalid options.
    pub fn new(options: ClassifierOptions) -> Result<Self> {
        let reconciler = Reconciler::new(ReconcileOptions::from(&options));
        let classifier = PageClassifier::new(options)?;
        Ok(Self {
            classifier,
            reconciler,
        })
    }

    /// The page classifier.
    pub fn classifier(&self) -> &PageClassifier {
        &self.classifier
    }

    /// The reconciler.
    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Analyze a document through a renderer and an OCR engine.
    pub fn analyze(
        &self,
        renderer: Arc<dyn PageRenderer>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Result<AnalysisReport> {
        let extractor = HeaderExtractor::new(renderer, ocr, self.classifier.options());
        self.analyze_with(&extractor)
    }

    /// Analyze a document with a prepared extractor.
    pub fn analyze_with(&self, extractor: &HeaderExtractor) -> Result<AnalysisReport> {
        let pages = self.classifier.classify_document(extractor);
        self.build_report(pages)
    }

    /// Analyze pre-recognized header fragments.
    pub fn analyze_dump(&self, dump: &HeaderDump) -> Result<AnalysisReport> {
        let pages = self.classifier.classify_fragments(&dump.pages);
        self.build_report(pages)
    }

    fn build_report(&self, pages: Vec<PageClassification>) -> Result<AnalysisReport> {
        let raw_labels = PageClassifier::labels(&pages);
        let degenerate = !raw_labels.is_empty() && raw_labels.iter().all(SectionType::is_unknown);

        let outcome = self.reconciler.reconcile(&raw_labels);
        let sections = outcome.section_map()?;
        let summary = outcome.summary();

        for target in sections.split_plan() {
            log::info!("{}: pages {:?}", target.section, target.page_numbers());
        }
        for missing in sections.missing_sections() {
            log::info!("{}: no pages found", missing);
        }

        Ok(AnalysisReport {
            page_count: raw_labels.len(),
            algorithm: self.classifier.options().algorithm,
            pages,
            raw_labels,
            labels: outcome.labels,
            errors: outcome.errors,
            corrections: outcome.corrections,
            summary,
            sections,
            degenerate,
            analyzed_at: Utc::now(),
        })
    }
}

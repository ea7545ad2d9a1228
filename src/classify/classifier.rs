//! Per-page section classification.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ClassifierOptions, HeaderExtractor};
use crate::error::Result;
use crate::matcher::{HeaderNormalizer, MatchResult, MatchStrategy};
use crate::model::{HeaderPage, SectionType};

/// Classification of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageClassification {
    /// The page header as matched
    pub page: HeaderPage,

    /// Match details
    pub result: MatchResult,

    /// Why OCR produced no text, if it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_error: Option<String>,
}

impl PageClassification {
    /// Raw label of the page.
    pub fn section(&self) -> SectionType {
        self.result.section
    }
}

/// Assigns a raw section label to every page from its header text.
///
/// Pages are independent of each other here; continuity between pages is
/// handled afterwards by the [`Reconciler`](crate::reconcile::Reconciler).
#[derive(Debug)]
pub struct PageClassifier {
    options: ClassifierOptions,
    normalizer: HeaderNormalizer,
    strategy: Box<dyn MatchStrategy>,
}

impl PageClassifier {
    /// Create a classifier, validating the options.
    pub fn new(options: ClassifierOptions) -> Result<Self> {
        options.validate()?;
        let normalizer = HeaderNormalizer::new(options.max_cjk_chars);
        let strategy = options.algorithm.strategy();
        Ok(Self {
            options,
            normalizer,
            strategy,
        })
    }

    /// Options in use.
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classify one page from its header fragments.
    pub fn classify_page(&self, index: usize, fragments: Vec<String>) -> PageClassification {
        let combined = self.normalizer.combine(&fragments);
        log::debug!("page {}: combined text '{}'", index + 1, combined);

        let result = self.match_combined(&combined);
        log::debug!(
            "page {}: {:?} -> {} (keyword '{}')",
            index + 1,
            fragments,
            result.section,
            result.keyword
        );

        PageClassification {
            page: HeaderPage::new(index, fragments, combined),
            result,
            ocr_error: None,
        }
    }

    /// Match an already normalized header text.
    pub fn match_combined(&self, combined: &str) -> MatchResult {
        if combined.is_empty() {
            return MatchResult::unknown();
        }
        self.strategy
            .match_text(combined, &self.options.keywords, &self.options.priority)
    }

    /// Classify pre-recognized headers, one fragment list per page.
    pub fn classify_fragments(&self, pages: &[Vec<String>]) -> Vec<PageClassification> {
        if self.options.parallel {
            pages
                .par_iter()
                .enumerate()
                .map(|(index, fragments)| self.classify_page(index, fragments.clone()))
                .collect()
        } else {
            pages
                .iter()
                .enumerate()
                .map(|(index, fragments)| self.classify_page(index, fragments.clone()))
                .collect()
        }
    }

    /// Extract and classify every page of a document.
    ///
    /// OCR failures never abort the run: the page gets no text and an
    /// `unknown` label, and the failure is kept in `ocr_error`.
    pub fn classify_document(&self, extractor: &HeaderExtractor) -> Vec<PageClassification> {
        let page_count = extractor.page_count();
        log::info!(
            "Classifying {} pages (algorithm {}, CJK limit {}, continuity {})",
            page_count,
            self.options.algorithm,
            self.options.max_cjk_chars,
            if self.options.continuity { "on" } else { "off" }
        );

        let classify = |index: usize| match extractor.try_extract(index) {
            Ok(fragments) => self.classify_page(index, fragments),
            Err(e) => {
                log::warn!("Header OCR failed on page {}: {}", index + 1, e);
                let mut classification = self.classify_page(index, Vec::new());
                classification.ocr_error = Some(e.to_string());
                classification
            }
        };

        if self.options.parallel {
            (0..page_count).into_par_iter().map(classify).collect()
        } else {
            (0..page_count).map(classify).collect()
        }
    }

    /// Raw label sequence of a classified document.
    pub fn labels(classifications: &[PageClassification]) -> Vec<SectionType> {
        classifications.iter().map(PageClassification::section).collect()
    }
}

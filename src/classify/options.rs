//! Classifier options and configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matcher::{KeywordSet, MatchAlgorithm};
use crate::model::SectionType;

/// Options for classifying and reconciling patent pages.
///
/// All fields have defaults; a JSON config may supply any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Share of the page height, from the top, that is OCR'd
    pub header_ratio: f32,

    /// Scale passed to the page renderer
    pub render_scale: f32,

    /// Matching algorithm
    pub algorithm: MatchAlgorithm,

    /// Only the first N CJK characters of a header are matched (0 = unlimited)
    pub max_cjk_chars: usize,

    /// Whether isolated-page correction is applied
    pub continuity: bool,

    /// Minimum confidence for a continuity correction to be applied
    pub correction_threshold: f32,

    /// Whether pages are classified in parallel
    pub parallel: bool,

    /// Per-page OCR timeout in milliseconds (0 = no timeout)
    pub ocr_timeout_ms: u64,

    /// Header keywords per section
    pub keywords: KeywordSet,

    /// Section matching priority, most specific first
    pub priority: Vec<SectionType>,
}

impl ClassifierOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header region ratio.
    pub fn with_header_ratio(mut self, ratio: f32) -> Self {
        self.header_ratio = ratio;
        self
    }

    /// Set the render scale.
    pub fn with_render_scale(mut self, scale: f32) -> Self {
        self.render_scale = scale;
        self
    }

    /// Set the matching algorithm.
    pub fn with_algorithm(mut self, algorithm: MatchAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the CJK character limit (0 = unlimited).
    pub fn with_max_cjk_chars(mut self, max: usize) -> Self {
        self.max_cjk_chars = max;
        self
    }

    /// Enable or disable continuity correction.
    pub fn with_continuity(mut self, enabled: bool) -> Self {
        self.continuity = enabled;
        self
    }

    /// Set the continuity correction threshold.
    pub fn with_correction_threshold(mut self, threshold: f32) -> Self {
        self.correction_threshold = threshold;
        self
    }

    /// Enable or disable parallel classification.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the per-page OCR timeout in milliseconds.
    pub fn with_ocr_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.ocr_timeout_ms = timeout_ms;
        self
    }

    /// Set the keyword lists.
    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    /// Set the matching priority.
    pub fn with_priority(mut self, priority: Vec<SectionType>) -> Self {
        self.priority = priority;
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.header_ratio > 0.0 && self.header_ratio <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "header_ratio must be in (0, 1], got {}",
                self.header_ratio
            )));
        }
        if !(self.render_scale > 0.0 && self.render_scale.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "render_scale must be positive, got {}",
                self.render_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.correction_threshold) {
            return Err(Error::InvalidConfig(format!(
                "correction_threshold must be in [0, 1], got {}",
                self.correction_threshold
            )));
        }

        for section in SectionType::SECTIONS {
            let count = self.priority.iter().filter(|&&s| s == section).count();
            if count != 1 {
                return Err(Error::InvalidConfig(format!(
                    "priority must list {} exactly once",
                    section
                )));
            }
            if !self.keywords.contains(section) {
                return Err(Error::InvalidConfig(format!(
                    "no keywords configured for {}",
                    section
                )));
            }
        }
        if self.priority.len() != SectionType::SECTIONS.len() {
            return Err(Error::InvalidConfig(
                "priority may only list front, claims, descriptions and drawings".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            header_ratio: 0.15,
            render_scale: 2.0,
            algorithm: MatchAlgorithm::Fuzzy,
            max_cjk_chars: 10,
            continuity: true,
            correction_threshold: 0.7,
            parallel: false,
            ocr_timeout_ms: 30_000,
            keywords: KeywordSet::default(),
            priority: SectionType::DEFAULT_PRIORITY.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ClassifierOptions::new()
            .with_algorithm(MatchAlgorithm::Positional)
            .with_max_cjk_chars(0)
            .with_continuity(false)
            .with_parallel(true);

        assert_eq!(options.algorithm, MatchAlgorithm::Positional);
        assert_eq!(options.max_cjk_chars, 0);
        assert!(!options.continuity);
        assert!(options.parallel);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_default_options() {
        let options = ClassifierOptions::default();
        assert_eq!(options.header_ratio, 0.15);
        assert_eq!(options.algorithm, MatchAlgorithm::Fuzzy);
        assert_eq!(options.max_cjk_chars, 10);
        assert!(options.continuity);
        assert!(!options.parallel);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        let options = ClassifierOptions::new().with_header_ratio(0.0);
        assert!(matches!(options.validate(), Err(Error::InvalidConfig(_))));
        let options = ClassifierOptions::new().with_header_ratio(1.5);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_priority() {
        let options = ClassifierOptions::new().with_priority(vec![
            SectionType::Drawings,
            SectionType::Drawings,
            SectionType::Claims,
            SectionType::Front,
        ]);
        assert!(options.validate().is_err());

        let mut priority = SectionType::DEFAULT_PRIORITY.to_vec();
        priority.push(SectionType::Unknown);
        assert!(ClassifierOptions::new()
            .with_priority(priority)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_missing_keywords() {
        let options = ClassifierOptions::new()
            .with_keywords(KeywordSet::empty().with_keywords(SectionType::Front, ["国"]));
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_partial_json_config() {
        let options: ClassifierOptions =
            serde_json::from_str(r#"{"algorithm": "v2", "max_cjk_chars": 0}"#).unwrap();
        assert_eq!(options.algorithm, MatchAlgorithm::Positional);
        assert_eq!(options.max_cjk_chars, 0);
        assert_eq!(options.header_ratio, 0.15);
        assert_eq!(options.keywords, KeywordSet::default());

        let bad = serde_json::from_str::<ClassifierOptions>(r#"{"algorithm": "v9"}"#);
        assert!(bad.is_err());
    }
}

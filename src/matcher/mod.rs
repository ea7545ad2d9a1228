//! Header keyword matching.
//!
//! A [`MatchStrategy`] turns the combined header text of one page into a
//! section label. Two strategies exist and are chosen with
//! [`MatchAlgorithm`]:
//!
//! - [`PositionalMatcher`] (`"v2"`): the earliest exact keyword occurrence wins.
//! - [`FuzzyMatcher`] (`"v3"`): character-level scoring that tolerates
//!   partially recognized headers.
//!
//! Both read the same [`KeywordSet`] and return the same [`MatchResult`]
//! shape. The priority list passed in decides ties: the section listed
//! first wins.
//!
//! # Example
//!
//! ```
//! use patsplit::matcher::{KeywordSet, MatchAlgorithm};
//! use patsplit::model::SectionType;
//!
//! let strategy = MatchAlgorithm::Positional.strategy();
//! let result = strategy.match_text(
//!     "国家知识产权局",
//!     &KeywordSet::default(),
//!     &SectionType::DEFAULT_PRIORITY,
//! );
//! assert_eq!(result.section, SectionType::Front);
//! ```

mod fuzzy;
mod keywords;
mod normalize;
mod positional;

pub use fuzzy::{keyword_score, FuzzyMatcher};
pub use keywords::KeywordSet;
pub use normalize::HeaderNormalizer;
pub use positional::PositionalMatcher;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::SectionType;

/// Best keyword hit for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Section the keyword belongs to
    pub section: SectionType,

    /// Strategy-specific strength (keyword length for v2, fuzzy score for v3)
    pub score: f64,

    /// The keyword that produced the score
    pub keyword: String,

    /// Character position of the hit (positional strategy only)
    pub position: Option<usize>,
}

/// Outcome of matching one page header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Chosen section, `Unknown` if nothing matched
    pub section: SectionType,

    /// Score of the chosen candidate (0.0 when unknown)
    pub score: f64,

    /// Keyword of the chosen candidate (empty when unknown)
    pub keyword: String,

    /// Every section that matched, in priority order
    pub candidates: Vec<MatchCandidate>,

    /// The description-of-drawings rule forced `drawings`
    pub drawings_override: bool,
}

impl MatchResult {
    /// Result for a header with no matching keyword.
    pub fn unknown() -> Self {
        Self {
            section: SectionType::Unknown,
            score: 0.0,
            keyword: String::new(),
            candidates: Vec::new(),
            drawings_override: false,
        }
    }

    /// Pick the winner among matched candidates.
    ///
    /// `better(a, b)` returns true when `a` beats `b`; on equality the
    /// earlier candidate (higher priority) is kept.
    pub(crate) fn select<F>(candidates: Vec<MatchCandidate>, better: F) -> Self
    where
        F: Fn(&MatchCandidate, &MatchCandidate) -> bool,
    {
        let mut best: Option<&MatchCandidate> = None;
        for candidate in &candidates {
            if best.map_or(true, |b| better(candidate, b)) {
                best = Some(candidate);
            }
        }

        match best.cloned() {
            Some(winner) => Self {
                section: winner.section,
                score: winner.score,
                keyword: winner.keyword,
                candidates,
                drawings_override: false,
            },
            None => Self::unknown(),
        }
    }

    /// Force `drawings` as the result.
    pub(crate) fn override_to_drawings(candidates: Vec<MatchCandidate>) -> Self {
        let winner = candidates
            .iter()
            .find(|c| c.section == SectionType::Drawings)
            .cloned();
        let (score, keyword) = winner.map(|c| (c.score, c.keyword)).unwrap_or_default();
        Self {
            section: SectionType::Drawings,
            score,
            keyword,
            candidates,
            drawings_override: true,
        }
    }

    /// Check if no keyword matched.
    pub fn is_unknown(&self) -> bool {
        self.section.is_unknown()
    }

    /// Candidate for a given section, if it matched.
    pub fn candidate(&self, section: SectionType) -> Option<&MatchCandidate> {
        self.candidates.iter().find(|c| c.section == section)
    }
}

/// A header matching algorithm.
pub trait MatchStrategy: Send + Sync + fmt::Debug {
    /// Selector name of this strategy ("v2" or "v3").
    fn name(&self) -> &'static str;

    /// Classify a combined header text.
    ///
    /// # Arguments
    /// * `text` - Normalized header text (see [`HeaderNormalizer`])
    /// * `keywords` - Keyword lists per section
    /// * `priority` - Sections to try, highest priority first
    fn match_text(
        &self,
        text: &str,
        keywords: &KeywordSet,
        priority: &[SectionType],
    ) -> MatchResult;
}

/// Matching algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchAlgorithm {
    /// Earliest exact keyword position
    #[serde(rename = "v2", alias = "positional")]
    Positional,

    /// Character-level fuzzy scoring
    #[default]
    #[serde(rename = "v3", alias = "fuzzy")]
    Fuzzy,
}

impl MatchAlgorithm {
    /// Selector string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchAlgorithm::Positional => "v2",
            MatchAlgorithm::Fuzzy => "v3",
        }
    }

    /// Build the strategy for this selector.
    pub fn strategy(&self) -> Box<dyn MatchStrategy> {
        match self {
            MatchAlgorithm::Positional => Box::new(PositionalMatcher::new()),
            MatchAlgorithm::Fuzzy => Box::new(FuzzyMatcher::new()),
        }
    }
}

impl fmt::Display for MatchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v2" | "positional" => Ok(MatchAlgorithm::Positional),
            "v3" | "fuzzy" => Ok(MatchAlgorithm::Fuzzy),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

//! Character-level fuzzy matching (selector "v3").

use super::{KeywordSet, MatchCandidate, MatchResult, MatchStrategy};
use crate::model::SectionType;

/// Bonus when the whole keyword occurs contiguously.
const EXACT_BONUS: f64 = 0.5;

/// Maximum bonus for a partial in-order prefix match.
const PREFIX_BONUS: f64 = 0.3;

/// A prefix run must cover more than this share of the keyword.
const PREFIX_MIN_SHARE: f64 = 0.6;

/// Acceptance threshold for a single-character best keyword.
const SINGLE_CHAR_THRESHOLD: f64 = 1.0;

/// Acceptance threshold for a multi-character best keyword.
const MULTI_CHAR_THRESHOLD: f64 = 0.3;

/// Drawings must reach this share of the descriptions score to be forced.
const DRAWINGS_SHARE: f64 = 0.7;

/// Characters that mark a description-of-drawings header.
const DRAWINGS_MARKERS: [char; 2] = ['附', '图'];

/// Score one keyword against the header characters.
///
/// Single-character keywords score 1.0 if present, else 0.0. Longer
/// keywords score the share of their characters present anywhere, plus
/// 0.5 if the keyword occurs contiguously, plus up to 0.3 for the best
/// window whose in-order prefix covers more than 60% of the keyword.
/// Scores are not capped.
pub fn keyword_score(text: &[char], keyword: &str) -> f64 {
    let keyword: Vec<char> = keyword.chars().collect();
    match keyword.len() {
        0 => 0.0,
        1 => {
            if text.contains(&keyword[0]) {
                1.0
            } else {
                0.0
            }
        }
        len => {
            let len_f = len as f64;
            let present = keyword.iter().filter(|c| text.contains(c)).count();
            let mut score = present as f64 / len_f;

            if text.windows(len).any(|w| w == keyword.as_slice()) {
                score += EXACT_BONUS;
            }

            let best_prefix = text
                .windows(len)
                .map(|w| w.iter().zip(&keyword).take_while(|(a, b)| a == b).count())
                .max()
                .unwrap_or(0);
            if best_prefix as f64 > len_f * PREFIX_MIN_SHARE {
                score += best_prefix as f64 / len_f * PREFIX_BONUS;
            }

            score
        }
    }
}

/// Scores every keyword of every section and picks the highest score.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    /// Create a fuzzy matcher.
    pub fn new() -> Self {
        Self
    }

    /// Best keyword of one section, if it passes the threshold.
    fn best_keyword(text: &[char], keywords: &[String]) -> Option<(f64, String)> {
        let mut best_score = 0.0;
        let mut best_keyword: &str = "";
        for keyword in keywords {
            let score = keyword_score(text, keyword);
            if score > best_score {
                best_score = score;
                best_keyword = keyword.as_str();
            }
        }

        let threshold = if best_keyword.chars().count() > 1 {
            MULTI_CHAR_THRESHOLD
        } else {
            SINGLE_CHAR_THRESHOLD
        };
        (best_score >= threshold).then(|| (best_score, best_keyword.to_string()))
    }
}

impl MatchStrategy for FuzzyMatcher {
    fn name(&self) -> &'static str {
        "v3"
    }

    fn match_text(
        &self,
        text: &str,
        keywords: &KeywordSet,
        priority: &[SectionType],
    ) -> MatchResult {
        let chars: Vec<char> = text.chars().collect();
        let candidates: Vec<MatchCandidate> = priority
            .iter()
            .filter_map(|&section| {
                Self::best_keyword(&chars, keywords.keywords(section)).map(|(score, keyword)| {
                    log::debug!("    {}: '{}' scored {:.2}", section, keyword, score);
                    MatchCandidate {
                        section,
                        score,
                        keyword,
                        position: None,
                    }
                })
            })
            .collect();

        if candidates.is_empty() {
            return MatchResult::unknown();
        }

        let score_of = |section: SectionType| {
            candidates
                .iter()
                .find(|c| c.section == section)
                .map(|c| c.score)
        };
        if let (Some(drawings), Some(descriptions)) = (
            score_of(SectionType::Drawings),
            score_of(SectionType::Descriptions),
        ) {
            let has_marker = chars.iter().any(|c| DRAWINGS_MARKERS.contains(c));
            if has_marker && drawings >= descriptions * DRAWINGS_SHARE {
                log::debug!("    drawings markers present, choosing drawings");
                return MatchResult::override_to_drawings(candidates);
            }
        }

        MatchResult::select(candidates, |a, b| a.score > b.score)
    }
}

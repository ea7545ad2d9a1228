//! Positional exact matching (selector "v2").

use super::{KeywordSet, MatchCandidate, MatchResult, MatchStrategy};
use crate::model::SectionType;

/// Maximum distance, in characters, between a drawings hit and a
/// descriptions hit for the pair to be read as "说明书附图".
const DRAWINGS_PROXIMITY: usize = 10;

/// Picks the section whose keyword occurs earliest in the header.
///
/// For each section the earliest exact occurrence of any of its keywords is
/// taken (on equal positions the keyword listed first wins). The section
/// with the smallest position wins, then the longer keyword, then priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalMatcher;

impl PositionalMatcher {
    /// Create a positional matcher.
    pub fn new() -> Self {
        Self
    }

    /// Earliest keyword hit as `(char_position, keyword)`.
    pub fn find_earliest<'k>(text: &str, keywords: &'k [String]) -> Option<(usize, &'k str)> {
        let mut best: Option<(usize, &'k str)> = None;
        for keyword in keywords.iter().filter(|k| !k.is_empty()) {
            if let Some(byte_pos) = text.find(keyword.as_str()) {
                let pos = text[..byte_pos].chars().count();
                if best.map_or(true, |(best_pos, _)| pos < best_pos) {
                    best = Some((pos, keyword.as_str()));
                }
            }
        }
        best
    }
}

impl MatchStrategy for PositionalMatcher {
    fn name(&self) -> &'static str {
        "v2"
    }

    fn match_text(
        &self,
        text: &str,
        keywords: &KeywordSet,
        priority: &[SectionType],
    ) -> MatchResult {
        let candidates: Vec<MatchCandidate> = priority
            .iter()
            .filter_map(|&section| {
                Self::find_earliest(text, keywords.keywords(section)).map(|(pos, keyword)| {
                    log::debug!("    {}: '{}' at {}", section, keyword, pos);
                    MatchCandidate {
                        section,
                        score: keyword.chars().count() as f64,
                        keyword: keyword.to_string(),
                        position: Some(pos),
                    }
                })
            })
            .collect();

        if candidates.is_empty() {
            return MatchResult::unknown();
        }

        let position_of = |section: SectionType| {
            candidates
                .iter()
                .find(|c| c.section == section)
                .and_then(|c| c.position)
        };
        if let (Some(drawings), Some(descriptions)) = (
            position_of(SectionType::Drawings),
            position_of(SectionType::Descriptions),
        ) {
            if drawings.abs_diff(descriptions) <= DRAWINGS_PROXIMITY {
                log::debug!("    drawings and descriptions adjacent, choosing drawings");
                return MatchResult::override_to_drawings(candidates);
            }
        }

        MatchResult::select(candidates, |a, b| {
            let (pa, pb) = (a.position.unwrap_or(usize::MAX), b.position.unwrap_or(usize::MAX));
            pa < pb || (pa == pb && a.score > b.score)
        })
    }
}

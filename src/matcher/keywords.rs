//! Header keyword sets per section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::SectionType;

/// Keywords that identify each section's running header.
///
/// List order matters for the positional matcher: among keywords found at
/// the same position, the one listed first wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet {
    sets: BTreeMap<SectionType, Vec<String>>,
}

impl KeywordSet {
    /// Create an empty keyword set.
    pub fn empty() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Set the keyword list of one section.
    pub fn with_keywords<I, S>(mut self, section: SectionType, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .insert(section, keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Keywords for a section (empty if none configured).
    pub fn keywords(&self, section: SectionType) -> &[String] {
        self.sets.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a section has at least one keyword.
    pub fn contains(&self, section: SectionType) -> bool {
        !self.keywords(section).is_empty()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::empty()
            .with_keywords(SectionType::Drawings, ["附", "图", "附图", "说明书附图"])
            .with_keywords(
                SectionType::Descriptions,
                ["说", "明", "说明书", "说明", "明书"],
            )
            .with_keywords(
                SectionType::Claims,
                ["要", "求", "要求", "权利", "权利要求", "权利要求书"],
            )
            .with_keywords(
                SectionType::Front,
                ["国", "家", "国家", "知识", "产权", "知识产权", "国家知识产权局"],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keywords() {
        let set = KeywordSet::default();
        assert_eq!(set.keywords(SectionType::Drawings)[3], "说明书附图");
        assert_eq!(set.keywords(SectionType::Claims).len(), 6);
        assert_eq!(set.keywords(SectionType::Front).last().unwrap(), "国家知识产权局");
        assert!(set.keywords(SectionType::Unknown).is_empty());
    }

    #[test]
    fn test_with_keywords_replaces() {
        let set = KeywordSet::default().with_keywords(SectionType::Front, ["首页"]);
        assert_eq!(set.keywords(SectionType::Front), ["首页".to_string()]);
        assert!(set.contains(SectionType::Claims));
    }

    #[test]
    fn test_keyword_set_serde() {
        let set = KeywordSet::empty().with_keywords(SectionType::Claims, ["权利要求书"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"claims":["权利要求书"]}"#);
        let back: KeywordSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}

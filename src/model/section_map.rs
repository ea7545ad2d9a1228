//! Final page grouping per section.

use serde::{Deserialize, Serialize};

use super::SectionType;
use crate::error::{Error, Result};

/// Page indices per section, ascending and unique.
///
/// Every page of the document is in exactly one bucket. A bucket may be
/// empty when the section was not found, and pages of one section are not
/// guaranteed to be contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    /// Front page(s)
    pub front: Vec<usize>,

    /// Claims pages
    pub claims: Vec<usize>,

    /// Description pages
    pub descriptions: Vec<usize>,

    /// Drawing pages
    pub drawings: Vec<usize>,
}

impl SectionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a resolved label sequence by section.
    ///
    /// Fails with [`Error::UnresolvedPage`] if any label is `unknown`.
    pub fn from_labels(labels: &[SectionType]) -> Result<Self> {
        let mut map = Self::new();
        for (index, label) in labels.iter().enumerate() {
            map.bucket_mut(*label)
                .ok_or(Error::UnresolvedPage(index))?
                .push(index);
        }
        Ok(map)
    }

    fn bucket_mut(&mut self, section: SectionType) -> Option<&mut Vec<usize>> {
        match section {
            SectionType::Front => Some(&mut self.front),
            SectionType::Claims => Some(&mut self.claims),
            SectionType::Descriptions => Some(&mut self.descriptions),
            SectionType::Drawings => Some(&mut self.drawings),
            SectionType::Unknown => None,
        }
    }

    /// Pages of a section (`unknown` is always empty).
    pub fn pages(&self, section: SectionType) -> &[usize] {
        match section {
            SectionType::Front => &self.front,
            SectionType::Claims => &self.claims,
            SectionType::Descriptions => &self.descriptions,
            SectionType::Drawings => &self.drawings,
            SectionType::Unknown => &[],
        }
    }

    /// Iterate `(section, pages)` in document order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionType, &[usize])> {
        SectionType::SECTIONS
            .into_iter()
            .map(move |section| (section, self.pages(section)))
    }

    /// Total number of pages across all sections.
    pub fn page_count(&self) -> usize {
        self.iter().map(|(_, pages)| pages.len()).sum()
    }

    /// Sections with no pages.
    pub fn missing_sections(&self) -> Vec<SectionType> {
        self.iter()
            .filter(|(_, pages)| pages.is_empty())
            .map(|(section, _)| section)
            .collect()
    }

    /// Check if a section forms one unbroken page range.
    ///
    /// Empty sections count as contiguous.
    pub fn is_contiguous(&self, section: SectionType) -> bool {
        self.pages(section).windows(2).all(|w| w[1] == w[0] + 1)
    }

    /// Output files for the PDF writer, one per non-empty section.
    pub fn split_plan(&self) -> Vec<SplitTarget> {
        self.iter()
            .filter(|(_, pages)| !pages.is_empty())
            .map(|(section, pages)| SplitTarget {
                section,
                file_name: section.file_name(),
                pages: pages.to_vec(),
            })
            .collect()
    }
}

/// One output document of the split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTarget {
    /// Section this file holds
    pub section: SectionType,

    /// Suggested output file name
    pub file_name: String,

    /// Source page indices (0-based, ascending)
    pub pages: Vec<usize>,
}

impl SplitTarget {
    /// 1-indexed page numbers, for display.
    pub fn page_numbers(&self) -> Vec<usize> {
        self.pages.iter().map(|p| p + 1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionType::*;

    #[test]
    fn test_from_labels() {
        let labels = [Front, Front, Claims, Descriptions, Descriptions, Drawings];
        let map = SectionMap::from_labels(&labels).unwrap();
        assert_eq!(map.front, vec![0, 1]);
        assert_eq!(map.claims, vec![2]);
        assert_eq!(map.descriptions, vec![3, 4]);
        assert_eq!(map.drawings, vec![5]);
        assert_eq!(map.page_count(), 6);
    }

    #[test]
    fn test_from_labels_rejects_unknown() {
        let err = SectionMap::from_labels(&[Front, Unknown]).unwrap_err();
        assert!(matches!(err, Error::UnresolvedPage(1)));
    }

    #[test]
    fn test_missing_and_contiguous() {
        let map = SectionMap::from_labels(&[Claims, Front, Claims]).unwrap();
        assert_eq!(map.missing_sections(), vec![Descriptions, Drawings]);
        assert!(!map.is_contiguous(Claims));
        assert!(map.is_contiguous(Front));
        assert!(map.is_contiguous(Drawings));
    }

    #[test]
    fn test_split_plan() {
        let map = SectionMap::from_labels(&[Front, Claims, Claims]).unwrap();
        let plan = map.split_plan();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].file_name, "front.pdf");
        assert_eq!(plan[1].section, Claims);
        assert_eq!(plan[1].page_numbers(), vec![2, 3]);
    }
}

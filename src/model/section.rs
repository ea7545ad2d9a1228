//! Section types of a patent document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Structural part of a patent document a page belongs to.
///
/// `Unknown` only exists between classification and reconciliation; it is
/// never part of a [`SectionMap`](super::SectionMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    /// Cover / front page (bibliographic data, abstract)
    Front,
    /// Claims
    Claims,
    /// Description
    Descriptions,
    /// Drawings
    Drawings,
    /// No keyword matched
    Unknown,
}

impl SectionType {
    /// The four real sections in document order.
    pub const SECTIONS: [SectionType; 4] = [
        SectionType::Front,
        SectionType::Claims,
        SectionType::Descriptions,
        SectionType::Drawings,
    ];

    /// Default matching priority, most specific first.
    pub const DEFAULT_PRIORITY: [SectionType; 4] = [
        SectionType::Drawings,
        SectionType::Claims,
        SectionType::Descriptions,
        SectionType::Front,
    ];

    /// Lowercase name used in logs, JSON and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Front => "front",
            SectionType::Claims => "claims",
            SectionType::Descriptions => "descriptions",
            SectionType::Drawings => "drawings",
            SectionType::Unknown => "unknown",
        }
    }

    /// Check if this is the transient `unknown` label.
    pub fn is_unknown(&self) -> bool {
        matches!(self, SectionType::Unknown)
    }

    /// File name the PDF writer uses for this section.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.as_str())
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(SectionType::Front),
            "claims" => Ok(SectionType::Claims),
            "descriptions" | "description" => Ok(SectionType::Descriptions),
            "drawings" | "drawing" => Ok(SectionType::Drawings),
            "unknown" => Ok(SectionType::Unknown),
            other => Err(Error::Other(format!("Unknown section type: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_names() {
        assert_eq!(SectionType::Front.to_string(), "front");
        assert_eq!(SectionType::Drawings.file_name(), "drawings.pdf");
        assert!(SectionType::Unknown.is_unknown());
        assert!(!SectionType::Claims.is_unknown());
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!("claims".parse::<SectionType>().unwrap(), SectionType::Claims);
        assert_eq!(
            " Descriptions ".parse::<SectionType>().unwrap(),
            SectionType::Descriptions
        );
        assert!("abstract".parse::<SectionType>().is_err());
    }

    #[test]
    fn test_section_serde() {
        let json = serde_json::to_string(&SectionType::Descriptions).unwrap();
        assert_eq!(json, "\"descriptions\"");
        let back: SectionType = serde_json::from_str("\"drawings\"").unwrap();
        assert_eq!(back, SectionType::Drawings);
    }
}

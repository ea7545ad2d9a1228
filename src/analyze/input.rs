//! Loading pre-recognized header text.
//!
//! A header dump holds the OCR fragments of every page's header region,
//! either as `{"pages": [["..."], ...]}` or as a bare array of arrays.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// Bare must be tried first so `[[]]` reads as one blank page.
#[derive(Deserialize)]
#[serde(untagged)]
enum DumpShape {
    Bare(Vec<Vec<String>>),
    Wrapped { pages: Vec<Vec<String>> },
}

/// Header fragments of a whole document, one list per page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDump {
    /// Fragments per page, in page order
    pub pages: Vec<Vec<String>>,
}

impl HeaderDump {
    /// Create a dump from per-page fragments.
    pub fn new(pages: Vec<Vec<String>>) -> Self {
        Self { pages }
    }

    /// Read a dump from JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let pages = match serde_json::from_reader(reader)? {
            DumpShape::Wrapped { pages } | DumpShape::Bare(pages) => pages,
        };
        Ok(Self { pages })
    }

    /// Read a dump from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Read a dump from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

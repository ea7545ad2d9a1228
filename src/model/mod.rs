//! Data model shared by the classifier, the reconciler and the report.
//!
//! Pages and label sequences are created fresh for every document run; the
//! [`SectionMap`] is the terminal output handed to the PDF writer.

mod correction;
mod page;
mod section;
mod section_map;

pub use correction::{Correction, CorrectionReason, CorrectionSummary};
pub use page::{BoundingBox, HeaderPage, OcrLine, PageImage};
pub use section::SectionType;
pub use section_map::{SectionMap, SplitTarget};

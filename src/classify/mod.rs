//! Page classification: header extraction and raw section labels.

mod classifier;
mod extractor;
mod options;

pub use classifier::{PageClassification, PageClassifier};
pub use extractor::{HeaderExtractor, OcrEngine, PageRenderer};
pub use options::ClassifierOptions;

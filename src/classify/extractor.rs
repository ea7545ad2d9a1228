//! Header text extraction through external renderer and OCR collaborators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};

use super::ClassifierOptions;
use crate::error::{Error, Result};
use crate::model::{OcrLine, PageImage};

/// Renders document pages to images.
///
/// Implement this trait to plug in a PDF rasterizer.
pub trait PageRenderer: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Render a page (0-based) at the given scale.
    fn render_page(&self, index: usize, scale: f32) -> Result<PageImage>;
}

/// Recognizes text lines in an image.
///
/// Implement this trait to plug in an OCR engine. Only the recognized text
/// is used for classification; regions are kept for callers.
pub trait OcrEngine: Send + Sync {
    /// Recognize text lines, in the engine's reading order.
    fn recognize(&self, image: &PageImage) -> Result<Vec<OcrLine>>;
}

/// Renders a page, crops its header region and runs OCR on it.
///
/// OCR runs on a helper thread when a timeout is configured. A timed out
/// helper is detached and its late result dropped. After the first timeout
/// the engine counts as stalled: later pages fail at once instead of
/// calling it again.
pub struct HeaderExtractor {
    renderer: Arc<dyn PageRenderer>,
    ocr: Arc<dyn OcrEngine>,
    header_ratio: f32,
    render_scale: f32,
    timeout: Option<Duration>,
    stalled: AtomicBool,
}

impl HeaderExtractor {
    /// Create an extractor using the region, scale and timeout from `options`.
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        ocr: Arc<dyn OcrEngine>,
        options: &ClassifierOptions,
    ) -> Self {
        let timeout = (options.ocr_timeout_ms > 0)
            .then(|| Duration::from_millis(options.ocr_timeout_ms));
        Self {
            renderer,
            ocr,
            header_ratio: options.header_ratio,
            render_scale: options.render_scale,
            timeout,
            stalled: AtomicBool::new(false),
        }
    }

    /// Check if an earlier OCR call timed out.
    pub fn is_stalled(&self) -> bool {
        self.stalled.load(Ordering::Acquire)
    }

    /// Number of pages in the underlying document.
    pub fn page_count(&self) -> usize {
        self.renderer.page_count()
    }

    /// Header fragments of a page; any failure yields an empty list.
    pub fn extract(&self, index: usize) -> Vec<String> {
        self.try_extract(index).unwrap_or_else(|e| {
            log::warn!("Header OCR failed on page {}: {}", index + 1, e);
            Vec::new()
        })
    }

    /// Header fragments of a page, reporting failures.
    pub fn try_extract(&self, index: usize) -> Result<Vec<String>> {
        let count = self.page_count();
        if index >= count {
            return Err(Error::PageOutOfRange(index, count));
        }

        let image = self.renderer.render_page(index, self.render_scale)?;
        let header = image.crop_top(self.header_ratio);
        let lines = self.recognize(index, header)?;

        Ok(lines.into_iter().map(|line| line.text).collect())
    }

    fn recognize(&self, index: usize, header: PageImage) -> Result<Vec<OcrLine>> {
        let Some(timeout) = self.timeout else {
            return self.ocr.recognize(&header);
        };
        if self.is_stalled() {
            return Err(Error::Ocr(format!(
                "OCR engine stalled on an earlier page, skipping page {}",
                index + 1
            )));
        }

        let (tx, rx) = bounded(1);
        let ocr = Arc::clone(&self.ocr);
        thread::Builder::new()
            .name(format!("ocr-page-{}", index + 1))
            .spawn(move || {
                // The receiver is gone if we already timed out
                let _ = tx.send(ocr.recognize(&header));
            })?;

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                if !self.stalled.swap(true, Ordering::AcqRel) {
                    log::warn!(
                        "OCR engine stalled on page {}, skipping OCR for remaining pages",
                        index + 1
                    );
                }
                Err(Error::OcrTimeout {
                    page: index,
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::Ocr("OCR worker exited without a result".to_string()))
            }
        }
    }
}

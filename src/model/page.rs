//! Page-level types.

use serde::{Deserialize, Serialize};

/// The header of a single page, as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderPage {
    /// Page index (0-based)
    pub index: usize,

    /// OCR text fragments from the header region, in engine order
    pub fragments: Vec<String>,

    /// Fragments joined and normalized for matching
    pub combined_text: String,
}

impl HeaderPage {
    /// Create a page from its raw fragments and the normalized text.
    pub fn new(index: usize, fragments: Vec<String>, combined_text: impl Into<String>) -> Self {
        Self {
            index,
            fragments,
            combined_text: combined_text.into(),
        }
    }

    /// Check if OCR returned nothing usable for this page.
    pub fn is_blank(&self) -> bool {
        self.combined_text.is_empty()
    }

    /// 1-indexed page number, for human-facing output.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// A rendered page raster.
///
/// Pixels are stored row-major, `channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Bytes per pixel (1 = gray, 3 = RGB, 4 = RGBA)
    pub channels: u8,

    /// Pixel data
    pub data: Vec<u8>,
}

impl PageImage {
    /// Create an image from raw pixel data.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Create a blank (white) image.
    pub fn blank(width: u32, height: u32, channels: u8) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![255; len])
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Keep the top `ratio` of the image (ratio clamped to [0, 1]).
    ///
    /// The cut row is `floor(height * ratio)`.
    pub fn crop_top(&self, ratio: f32) -> PageImage {
        let ratio = ratio.clamp(0.0, 1.0);
        let rows = ((self.height as f32) * ratio).floor() as u32;
        let rows = rows.min(self.height);
        let end = (rows as usize * self.stride()).min(self.data.len());
        PageImage::new(self.width, rows, self.channels, self.data[..end].to_vec())
    }

    /// Check if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned region in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

/// One line recognized by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    /// Where the text was found
    pub region: BoundingBox,

    /// Recognized text
    pub text: String,
}

impl OcrLine {
    /// Create a line with an empty region.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            region: BoundingBox::default(),
            text: text.into(),
        }
    }
}

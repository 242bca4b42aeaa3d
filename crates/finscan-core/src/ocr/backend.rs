//! OCR capability abstraction.

use std::fmt;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Page layout assumption handed to the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSegMode {
    /// Fully automatic page segmentation, no orientation detection (psm 3).
    Auto,
    /// A single column of text of variable sizes (psm 4).
    SingleColumn,
    /// A single uniform block of text (psm 6).
    SingleBlock,
}

impl PageSegMode {
    /// The passes run for every document, in selection tie-break order.
    pub const PASSES: [PageSegMode; 3] = [Self::SingleBlock, Self::SingleColumn, Self::Auto];

    /// Tesseract `--psm` value.
    pub fn psm(&self) -> u8 {
        match self {
            Self::Auto => 3,
            Self::SingleColumn => 4,
            Self::SingleBlock => 6,
        }
    }

    /// Engine configuration string, e.g. `--oem 3 --psm 6`.
    pub fn config_string(&self, engine_mode: u8) -> String {
        format!("--oem {} --psm {}", engine_mode, self.psm())
    }
}

impl fmt::Display for PageSegMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::SingleColumn => write!(f, "single-column"),
            Self::SingleBlock => write!(f, "single-block"),
        }
    }
}

/// Abstraction over an OCR engine.
///
/// Implementations receive the preprocessed image and the page-segmentation
/// assumption for one pass and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image: &DynamicImage, mode: PageSegMode) -> Result<String, OcrError>;
}

impl<B: OcrBackend + ?Sized> OcrBackend for Box<B> {
    fn recognize(&self, image: &DynamicImage, mode: PageSegMode) -> Result<String, OcrError> {
        (**self).recognize(image, mode)
    }
}

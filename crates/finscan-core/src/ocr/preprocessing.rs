//! Image preprocessing for OCR.

use std::panic::{AssertUnwindSafe, catch_unwind};

use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::distance_transform::Norm;
use imageproc::filter::{gaussian_blur_f32, median_filter};
use imageproc::morphology::close;
use tracing::{debug, warn};

use crate::error::PreprocessError;
use crate::models::config::PreprocessConfig;

/// Image preprocessor producing a binarized page for OCR.
pub struct ImagePreprocessor {
    /// Skip the chain and hand the image through untouched.
    enabled: bool,
    /// Gaussian blur standard deviation.
    blur_sigma: f32,
    /// Morphological closing radius.
    close_radius: u8,
    /// Median filter radius.
    median_radius: u32,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self::from_config(&PreprocessConfig::default())
    }

    pub fn from_config(config: &PreprocessConfig) -> Self {
        Self {
            enabled: config.enabled,
            blur_sigma: config.blur_sigma,
            close_radius: config.close_radius,
            median_radius: config.median_radius,
        }
    }

    /// Preprocess an image for OCR.
    ///
    /// Never fails: if any stage fails the original image is returned so that
    /// OCR can still be attempted on it.
    pub fn preprocess(&self, image: &DynamicImage) -> DynamicImage {
        if !self.enabled {
            return image.clone();
        }

        match self.try_preprocess(image) {
            Ok(binary) => DynamicImage::ImageLuma8(binary),
            Err(e) => {
                warn!("Error in image preprocessing, using original image: {}", e);
                image.clone()
            }
        }
    }

    /// Run the full chain: grayscale, blur, Otsu binarization, closing, median.
    pub fn try_preprocess(&self, image: &DynamicImage) -> Result<GrayImage, PreprocessError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PreprocessError::Empty { width, height });
        }
        debug!("Preprocessing {}x{} image", width, height);

        let gray = match image {
            DynamicImage::ImageLuma8(gray) => gray.clone(),
            other => other.to_luma8(),
        };

        let blurred = run_stage("gaussian_blur", || gaussian_blur_f32(&gray, self.blur_sigma))?;

        let level = run_stage("otsu_threshold", || otsu_level(&blurred))?;
        debug!("Otsu level: {}", level);
        let binary = binarize(&blurred, level);

        let closed = run_stage("close", || close(&binary, Norm::LInf, self.close_radius))?;
        let cleaned = run_stage("median_blur", || {
            median_filter(&closed, self.median_radius, self.median_radius)
        })?;

        Ok(cleaned)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixels strictly above `level` become white, the rest black.
fn binarize(image: &GrayImage, level: u8) -> GrayImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        *pixel = if pixel[0] > level { Luma([255]) } else { Luma([0]) };
    }
    out
}

fn run_stage<T>(stage: &'static str, f: impl FnOnce() -> T) -> Result<T, PreprocessError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        PreprocessError::Stage { stage, reason }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn two_tone(width: u32, height: u32) -> GrayImage {
        // Dark band on the left, light page on the right.
        ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 { Luma([30u8]) } else { Luma([220u8]) }
        })
    }

    #[test]
    fn test_output_is_binary() {
        let preprocessor = ImagePreprocessor::new();
        let result = preprocessor
            .try_preprocess(&DynamicImage::ImageLuma8(two_tone(40, 20)))
            .unwrap();

        assert_eq!(result.dimensions(), (40, 20));
        assert!(result.pixels().all(|p| p[0] == 0 || p[0] == 255));
        // Far edges keep their side of the threshold.
        assert_eq!(result.get_pixel(0, 10)[0], 0);
        assert_eq!(result.get_pixel(39, 10)[0], 255);
    }

    #[test]
    fn test_color_input_becomes_single_channel() {
        let rgb: RgbImage = ImageBuffer::from_fn(16, 16, |x, _| {
            if x < 8 { Rgb([10u8, 10, 10]) } else { Rgb([240u8, 240, 240]) }
        });
        let out = ImagePreprocessor::new().preprocess(&DynamicImage::ImageRgb8(rgb));
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_empty_image_falls_back_to_original() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let preprocessor = ImagePreprocessor::new();

        assert!(matches!(
            preprocessor.try_preprocess(&empty),
            Err(PreprocessError::Empty { .. })
        ));
        let out = preprocessor.preprocess(&empty);
        assert!(matches!(out, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_failing_stage_falls_back_to_original() {
        // A non-positive sigma makes the blur stage abort.
        let preprocessor = ImagePreprocessor::from_config(&PreprocessConfig {
            blur_sigma: 0.0,
            ..PreprocessConfig::default()
        });
        let original = DynamicImage::ImageLuma8(two_tone(8, 8));

        assert!(matches!(
            preprocessor.try_preprocess(&original),
            Err(PreprocessError::Stage { stage: "gaussian_blur", .. })
        ));
        assert_eq!(preprocessor.preprocess(&original), original);
    }

    #[test]
    fn test_disabled_passes_through() {
        let preprocessor = ImagePreprocessor::from_config(&PreprocessConfig {
            enabled: false,
            ..PreprocessConfig::default()
        });
        let original = DynamicImage::ImageLuma8(two_tone(8, 8));
        assert_eq!(preprocessor.preprocess(&original), original);
    }

    #[test]
    fn test_binarize_threshold_is_strict() {
        let img: GrayImage = ImageBuffer::from_fn(3, 1, |x, _| Luma([[99u8, 100, 101][x as usize]]));
        let out = binarize(&img, 100);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(1, 0)[0], 0);
        assert_eq!(out.get_pixel(2, 0)[0], 255);
    }
}

//! Multi-pass OCR engine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, warn};

use crate::error::{InputError, OcrError};
use crate::models::config::{OcrConfig, PreprocessConfig};
use crate::models::document::Transcription;

use super::backend::{OcrBackend, PageSegMode};
use super::preprocessing::ImagePreprocessor;
use super::tesseract::TesseractCli;

/// Where a document image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Build a source from an optional path and optional bytes; exactly one
    /// must be present. An empty buffer counts as absent.
    pub fn from_parts(path: Option<&Path>, bytes: Option<&[u8]>) -> Result<Self, InputError> {
        let bytes = bytes.filter(|b| !b.is_empty());
        match (path, bytes) {
            (Some(path), None) => Ok(Self::Path(path.to_path_buf())),
            (None, Some(bytes)) => Ok(Self::Bytes(bytes.to_vec())),
            (None, None) => Err(InputError::Missing),
            (Some(_), Some(_)) => Err(InputError::Ambiguous),
        }
    }

    /// Decode the image.
    pub fn load(&self) -> Result<DynamicImage, InputError> {
        match self {
            Self::Path(path) => {
                if !path.exists() {
                    return Err(InputError::NotFound(path.display().to_string()));
                }
                image::open(path).map_err(|e| InputError::Load {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
            Self::Bytes(bytes) => {
                image::load_from_memory(bytes).map_err(|e| InputError::Decode(e.to_string()))
            }
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// OCR engine running every page-segmentation pass and keeping the longest
/// transcription.
pub struct OcrEngine<B: OcrBackend> {
    backend: B,
    preprocessor: ImagePreprocessor,
}

impl OcrEngine<TesseractCli> {
    /// Engine backed by the tesseract CLI.
    pub fn tesseract(ocr: &OcrConfig, preprocessing: &PreprocessConfig) -> Self {
        Self::new(TesseractCli::from_config(ocr))
            .with_preprocessor(ImagePreprocessor::from_config(preprocessing))
    }
}

impl<B: OcrBackend> OcrEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            preprocessor: ImagePreprocessor::new(),
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: ImagePreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load, preprocess and transcribe a document image.
    ///
    /// Input problems are reported through the returned transcription rather
    /// than as an error.
    pub fn extract(&self, source: &ImageSource) -> Transcription {
        match source.load() {
            Ok(image) => self.extract_image(&image),
            Err(e) => {
                warn!("Could not load image: {}", e);
                Transcription::failed(e.to_string())
            }
        }
    }

    /// Transcribe an already decoded image.
    pub fn extract_image(&self, image: &DynamicImage) -> Transcription {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        info!("Processing image: {}x{}", width, height);

        let processed = self.preprocessor.preprocess(image);

        let mut alternates = BTreeMap::new();
        let mut best: Option<(usize, String)> = None;
        let mut last_error: Option<OcrError> = None;

        for (i, mode) in PageSegMode::PASSES.iter().enumerate() {
            match self.backend.recognize(&processed, *mode) {
                Ok(text) => {
                    let len = text.chars().count();
                    debug!("OCR pass {} ({}) produced {} chars", i, mode, len);

                    // Strictly longer only, so earlier passes win ties.
                    if best.as_ref().is_none_or(|(best_len, _)| len > *best_len) {
                        best = Some((len, text.clone()));
                    }
                    alternates.insert(format!("config_{}", i), text);
                }
                Err(e) => {
                    warn!("OCR with config {} failed: {}", mode, e);
                    last_error = Some(e);
                }
            }
        }

        debug!("OCR finished in {}ms", start.elapsed().as_millis());

        match best {
            Some((_, text)) => Transcription {
                text,
                alternates,
                success: true,
                error: None,
            },
            None => {
                let message = match last_error {
                    Some(e) => format!("{}: {}", OcrError::NoOutput, e),
                    None => OcrError::NoOutput.to_string(),
                };
                Transcription::failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma};
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Scripted backend returning one canned response per pass.
    struct ScriptedBackend {
        responses: Vec<Result<String, String>>,
        calls: Mutex<Vec<PageSegMode>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<&str, &str>>) -> Self {
            Self {
                responses: responses
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl OcrBackend for ScriptedBackend {
        fn recognize(&self, _image: &DynamicImage, mode: PageSegMode) -> Result<String, OcrError> {
            let mut calls = self.calls.lock().unwrap();
            let idx = calls.len();
            calls.push(mode);
            match &self.responses[idx] {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(OcrError::Engine(e.clone())),
            }
        }
    }

    fn page() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([255u8])))
    }

    fn png_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        page().write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn test_longest_transcription_wins() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![
            Ok("short"),
            Ok("the longest text"),
            Ok("medium text"),
        ]));

        let result = engine.extract_image(&page());
        assert!(result.success);
        assert_eq!(result.text, "the longest text");
        assert_eq!(result.alternates.len(), 3);
        assert_eq!(result.alternates["config_0"], "short");
        assert_eq!(result.alternates["config_2"], "medium text");
    }

    #[test]
    fn test_tie_goes_to_first_pass() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![Ok("aaaa"), Ok("bbbb"), Ok("cc")]));
        assert_eq!(engine.extract_image(&page()).text, "aaaa");
    }

    #[test]
    fn test_passes_run_in_order() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![Ok("a"), Ok("b"), Ok("c")]));
        engine.extract_image(&page());

        let calls = engine.backend().calls.lock().unwrap().clone();
        assert_eq!(calls, PageSegMode::PASSES.to_vec());
    }

    #[test]
    fn test_failed_pass_is_skipped() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![
            Err("psm 6 crashed"),
            Ok("column text"),
            Ok("auto"),
        ]));

        let result = engine.extract_image(&page());
        assert!(result.success);
        assert_eq!(result.text, "column text");
        assert!(!result.alternates.contains_key("config_0"));
        assert_eq!(result.alternates.len(), 2);
    }

    #[test]
    fn test_all_passes_failing() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![
            Err("one"),
            Err("two"),
            Err("three"),
        ]));

        let result = engine.extract_image(&page());
        assert!(!result.success);
        assert!(result.text.is_empty());
        assert!(result.alternates.is_empty());
        let error = result.error.unwrap();
        assert!(error.contains("no OCR configuration produced output"));
        assert!(error.contains("three"));
    }

    #[test]
    fn test_empty_output_still_counts_as_success() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![Ok(""), Ok(""), Ok("")]));
        let result = engine.extract_image(&page());
        assert!(result.success);
        assert_eq!(result.text, "");
    }

    #[test]
    fn test_nonexistent_path() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![]));
        let source = ImageSource::Path(PathBuf::from("non_existent_image.jpg"));

        let result = engine.extract(&source);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("non_existent_image.jpg"));
    }

    #[test]
    fn test_extract_from_bytes() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![Ok("x"), Ok("xy"), Ok("")]));
        let result = engine.extract(&ImageSource::Bytes(png_bytes()));
        assert!(result.success);
        assert_eq!(result.text, "xy");
    }

    #[test]
    fn test_undecodable_bytes() {
        let engine = OcrEngine::new(ScriptedBackend::new(vec![]));
        let result = engine.extract(&ImageSource::Bytes(b"not an image".to_vec()));
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Failed to process image bytes"));
    }

    #[test]
    fn test_source_from_parts() {
        assert!(matches!(
            ImageSource::from_parts(None, None),
            Err(InputError::Missing)
        ));
        assert!(matches!(
            ImageSource::from_parts(Some(Path::new("a.png")), Some(&b"x"[..])),
            Err(InputError::Ambiguous)
        ));
        assert!(matches!(
            ImageSource::from_parts(Some(Path::new("a.png")), None),
            Ok(ImageSource::Path(_))
        ));
        assert!(matches!(
            ImageSource::from_parts(None, Some(&b"x"[..])),
            Ok(ImageSource::Bytes(_))
        ));
    }

    #[test]
    fn test_empty_bytes_count_as_missing() {
        assert!(matches!(
            ImageSource::from_parts(None, Some(&[][..])),
            Err(InputError::Missing)
        ));
        assert!(matches!(
            ImageSource::from_parts(Some(Path::new("a.png")), Some(&[][..])),
            Ok(ImageSource::Path(_))
        ));
    }
}

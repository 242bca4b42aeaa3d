//! Tesseract backend driving the `tesseract` executable.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{DynamicImage, ImageFormat};
use tracing::{debug, warn};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::backend::{OcrBackend, PageSegMode};

/// Command name used when no install location is found.
const FALLBACK_COMMAND: &str = "tesseract";

/// Well-known install locations, tried in order.
pub fn default_search_paths() -> Vec<PathBuf> {
    if cfg!(windows) {
        vec![
            PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe"),
            PathBuf::from(r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe"),
        ]
    } else {
        vec![
            PathBuf::from("/usr/bin/tesseract"),
            PathBuf::from("/usr/local/bin/tesseract"),
            PathBuf::from("/opt/homebrew/bin/tesseract"),
        ]
    }
}

/// Resolve the executable: explicit path, then the first existing candidate,
/// then the bare command name resolved through `PATH`.
pub fn locate_binary(explicit: Option<&Path>, candidates: &[PathBuf]) -> PathBuf {
    if let Some(path) = explicit {
        debug!("Using configured tesseract at {}", path.display());
        return path.to_path_buf();
    }

    if let Some(found) = candidates.iter().find(|p| p.exists()) {
        debug!("Found tesseract at {}", found.display());
        return found.clone();
    }

    warn!("Tesseract not found in standard locations, relying on PATH. Please install Tesseract OCR");
    PathBuf::from(FALLBACK_COMMAND)
}

/// OCR backend that shells out to the tesseract CLI.
pub struct TesseractCli {
    binary: PathBuf,
    language: String,
    engine_mode: u8,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            language: "eng".to_string(),
            engine_mode: 3,
        }
    }

    /// Build from configuration, resolving the binary location.
    pub fn from_config(config: &OcrConfig) -> Self {
        let binary = locate_binary(config.tesseract_path.as_deref(), &default_search_paths());
        Self::new(binary)
            .with_language(&config.language)
            .with_engine_mode(config.engine_mode)
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_engine_mode(mut self, engine_mode: u8) -> Self {
        self.engine_mode = engine_mode;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn write_input(&self, image: &DynamicImage) -> Result<tempfile::NamedTempFile, OcrError> {
        let mut file = tempfile::Builder::new()
            .prefix("finscan_ocr_")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::InvalidImage(format!("failed to create temp file: {}", e)))?;

        image
            .write_to(file.as_file_mut(), ImageFormat::Png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        Ok(file)
    }
}

impl OcrBackend for TesseractCli {
    fn recognize(&self, image: &DynamicImage, mode: PageSegMode) -> Result<String, OcrError> {
        let input = self.write_input(image)?;

        debug!(
            "Running {} with {}",
            self.binary.display(),
            mode.config_string(self.engine_mode)
        );

        let output = Command::new(&self.binary)
            .arg(input.path())
            .arg("stdout")
            .arg("--oem")
            .arg(self.engine_mode.to_string())
            .arg("--psm")
            .arg(mode.psm().to_string())
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| OcrError::Launch(format!("{}: {}", self.binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_explicit_path_wins() {
        let path = locate_binary(Some(Path::new("/custom/tesseract")), &default_search_paths());
        assert_eq!(path, PathBuf::from("/custom/tesseract"));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::fs::write(&first, b"").unwrap();
        std::fs::write(&second, b"").unwrap();

        let path = locate_binary(None, &[missing, first.clone(), second]);
        assert_eq!(path, first);
    }

    #[test]
    fn test_falls_back_to_command_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = locate_binary(None, &[dir.path().join("nope")]);
        assert_eq!(path, PathBuf::from("tesseract"));
    }

    #[test]
    fn test_missing_binary_is_launch_error() {
        let backend = TesseractCli::new("/definitely/not/a/tesseract/binary");
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255u8])));

        let err = backend.recognize(&image, PageSegMode::SingleBlock).unwrap_err();
        assert!(matches!(err, OcrError::Launch(_)));
    }

    /// Write an executable shell script standing in for the tesseract binary.
    #[cfg(unix)]
    fn fake_tesseract(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_invocation_and_stdout_capture() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("args.log");
        let script = fake_tesseract(
            dir.path(),
            "tesseract",
            &format!(
                "printf '%s\\n' \"$@\" > '{}'\nprintf 'INVOICE NO: INV-9'",
                log.display()
            ),
        );

        let backend = TesseractCli::new(&script).with_language("deu").with_engine_mode(1);
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255u8])));

        let text = backend.recognize(&image, PageSegMode::SingleColumn).unwrap();
        assert_eq!(text, "INVOICE NO: INV-9");

        let logged = std::fs::read_to_string(&log).unwrap();
        let args: Vec<&str> = logged.lines().collect();
        assert_eq!(args.len(), 8);
        assert!(args[0].ends_with(".png"));
        assert!(args[0].contains("finscan_ocr_"));
        assert_eq!(&args[1..], ["stdout", "--oem", "1", "--psm", "4", "-l", "deu"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_each_pass_uses_its_psm() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("psm.log");
        let script = fake_tesseract(
            dir.path(),
            "tesseract",
            &format!("echo \"$6\" >> '{}'\necho ok", log.display()),
        );

        let backend = TesseractCli::new(&script);
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255u8])));
        for mode in PageSegMode::PASSES {
            backend.recognize(&image, mode).unwrap();
        }

        let logged = std::fs::read_to_string(&log).unwrap();
        assert_eq!(logged.lines().collect::<Vec<_>>(), ["6", "4", "3"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_tesseract(dir.path(), "tesseract", "echo 'read error' >&2\nexit 1");

        let backend = TesseractCli::new(&script);
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255u8])));

        match backend.recognize(&image, PageSegMode::Auto) {
            Err(OcrError::Engine(message)) => assert_eq!(message, "read error"),
            other => panic!("expected engine error, got {:?}", other),
        }
    }
}

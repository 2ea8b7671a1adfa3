//! Recognition through the `tesseract` command line tool.

use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use super::{Result, TextRecognizer};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Runs `tesseract <image> stdout` for every page.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    binary: String,
    language: String,
    page_segmentation_mode: u8,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self::from_config(&OcrConfig::default())
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            binary: config.tesseract_binary.clone(),
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
        }
    }

    /// Use a different executable.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        if !image.is_file() {
            return Err(OcrError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("page image {} not found", image.display()),
            )));
        }

        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.page_segmentation_mode.to_string())
            .output()
            .map_err(|e| OcrError::Invocation {
                engine: self.binary.clone(),
                message: e.to_string(),
            })?;

        // A failing run may still have printed usable text
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "tesseract exited with {} on {}: {}",
                output.status,
                image.display(),
                stderr.trim()
            );
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("tesseract recognized {} characters in {}", text.len(), image.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = OcrConfig {
            language: "deu".to_string(),
            page_segmentation_mode: 6,
            ..Default::default()
        };
        let recognizer = TesseractRecognizer::from_config(&config);
        assert_eq!(recognizer.language, "deu");
        assert_eq!(recognizer.page_segmentation_mode, 6);
        assert_eq!(recognizer.binary, "tesseract");
    }

    #[test]
    fn test_missing_image_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TesseractRecognizer::new()
            .recognize(&dir.path().join("page-1.png"))
            .unwrap_err();
        assert!(matches!(err, OcrError::Io(_)));
    }

    #[test]
    fn test_missing_binary_is_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("page-1.png");
        std::fs::write(&image, b"").unwrap();

        let err = TesseractRecognizer::new()
            .with_binary("scanvoice-test-no-such-tesseract")
            .recognize(&image)
            .unwrap_err();
        assert!(matches!(err, OcrError::Invocation { .. }));
    }
}

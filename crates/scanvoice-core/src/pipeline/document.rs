//! Single-document pipeline: rasterize, recognize, aggregate, extract,
//! validate, serialize.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{AtStage, DocumentFailure, DocumentOutput, ScratchSpace, Stage};
use crate::error::{OcrError, ScanvoiceError};
use crate::invoice::{FieldExtractor, FieldValidator};
use crate::models::config::ScanvoiceConfig;
use crate::ocr::{self, TextRecognizer};
use crate::output::write_record_file;
use crate::pdf::{self, Rasterizer};
use crate::text::{Document, Page};

/// Turns one PDF into one CSV record.
///
/// Every run works inside its own [`ScratchSpace`], which is released when
/// the run ends whether it succeeded or not.
pub struct DocumentPipeline {
    rasterizer: Box<dyn Rasterizer>,
    recognizer: Box<dyn TextRecognizer>,
    extractor: FieldExtractor,
    validator: FieldValidator,
    scratch_root: PathBuf,
    output_dir: PathBuf,
}

impl DocumentPipeline {
    /// Create a pipeline with default extraction settings and locations.
    pub fn new(rasterizer: Box<dyn Rasterizer>, recognizer: Box<dyn TextRecognizer>) -> Self {
        let paths = crate::models::config::PathsConfig::default();
        Self {
            rasterizer,
            recognizer,
            extractor: FieldExtractor::new(),
            validator: FieldValidator::new(),
            scratch_root: paths.scratch_dir,
            output_dir: paths.output_dir,
        }
    }

    /// Build the collaborators and settings named in configuration.
    pub fn from_config(config: &ScanvoiceConfig) -> crate::Result<Self> {
        let rasterizer = pdf::from_config(&config.pdf);
        let recognizer =
            ocr::from_config(&config.ocr).map_err(|e| ScanvoiceError::Config(e.to_string()))?;

        Ok(Self::new(rasterizer, recognizer)
            .with_extractor(FieldExtractor::from_config(&config.extraction))
            .with_validator(FieldValidator::from_config(&config.extraction))
            .with_scratch_root(config.paths.scratch_dir.clone())
            .with_output_dir(config.paths.output_dir.clone()))
    }

    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_scratch_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_root = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the CSV for `source` goes.
    ///
    /// Defaults to `<stem>_extracted.csv` in the output directory. An absolute
    /// `output_name` is used as-is; a relative one is placed in the output
    /// directory.
    pub fn output_path(&self, source: &Path, output_name: Option<&Path>) -> PathBuf {
        match output_name {
            Some(name) if name.is_absolute() => name.to_path_buf(),
            Some(name) => self.output_dir.join(name),
            None => {
                let stem = source
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "document".to_string());
                self.output_dir.join(format!("{}_extracted.csv", stem))
            }
        }
    }

    /// Process one document end to end.
    pub fn process(
        &self,
        source: &Path,
        output_name: Option<&Path>,
    ) -> Result<DocumentOutput, DocumentFailure> {
        let start = Instant::now();
        let scratch = ScratchSpace::for_document(&self.scratch_root, source);

        info!("Processing {}", source.display());
        let result = self.run(source, output_name, &scratch, start);

        if let Err(e) = scratch.release() {
            warn!(
                "Failed to release scratch space {}: {}",
                scratch.dir().display(),
                e
            );
        }

        match &result {
            Ok(output) => info!(
                "Processed {} in {}ms -> {}",
                source.display(),
                output.processing_time_ms,
                output.csv_path.display()
            ),
            Err(failure) => warn!("{}", failure),
        }

        result
    }

    fn run(
        &self,
        source: &Path,
        output_name: Option<&Path>,
        scratch: &ScratchSpace,
        start: Instant,
    ) -> Result<DocumentOutput, DocumentFailure> {
        scratch
            .create()
            .and_then(|()| scratch.clear_images())
            .map_err(ScanvoiceError::Scratch)
            .at(Stage::Pending, source)?;

        debug!("{}: {}", Stage::Rasterizing, source.display());
        let images = self
            .rasterizer
            .rasterize(source, &scratch.images_dir())
            .map_err(|e| ScanvoiceError::SourceUnreadable {
                path: source.to_path_buf(),
                source: e,
            })
            .at(Stage::Rasterizing, source)?;

        if images.is_empty() {
            return Err(DocumentFailure::new(
                source,
                Stage::Rasterizing,
                ScanvoiceError::NoPagesProduced {
                    path: source.to_path_buf(),
                },
            ));
        }
        info!(
            "{} produced {} page images ({})",
            source.display(),
            images.len(),
            self.rasterizer.name()
        );

        let mut pages = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let text = self.recognize_page(index + 1, image).at(Stage::Recognizing, source)?;
            fs::write(scratch.page_text_path(index + 1), &text)
                .map_err(ScanvoiceError::Scratch)
                .at(Stage::Recognizing, source)?;
            pages.push(Page::new(index, text));
        }

        let aggregated = Document::new(source, pages).aggregate();
        fs::write(scratch.combined_text_path(), aggregated.as_str())
            .map_err(ScanvoiceError::Scratch)
            .at(Stage::Aggregating, source)?;
        debug!(
            "Aggregated {} pages into {} characters",
            aggregated.page_count(),
            aggregated.as_str().len()
        );

        let record = self.extractor.extract(aggregated.as_str());

        let validated = self.validator.validate(record);

        let csv_path = self.output_path(source, output_name);
        write_record_file(&csv_path, &validated.record).at(Stage::Serializing, source)?;

        if let Err(e) = scratch.purge_text() {
            warn!("Failed to purge scratch text for {}: {}", source.display(), e);
        }

        Ok(DocumentOutput {
            document: source.to_path_buf(),
            csv_path,
            record: validated.record,
            warnings: validated.warnings,
            page_count: aggregated.page_count(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Recognize one page. Engine failures degrade to empty text.
    fn recognize_page(&self, page: usize, image: &Path) -> crate::Result<String> {
        match self.recognizer.recognize(image) {
            Ok(text) => {
                debug!("Page {}: {} characters ({})", page, text.len(), self.recognizer.name());
                Ok(text)
            }
            Err(OcrError::Recognition(message)) => {
                warn!("Page {} recognized no text: {}", page, message);
                Ok(String::new())
            }
            Err(source) => Err(ScanvoiceError::RecognitionIo { page, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::models::record::Field;
    use pretty_assertions::assert_eq;

    /// Writes one page file per form-feed separated chunk of the source.
    struct TextPages;

    impl Rasterizer for TextPages {
        fn name(&self) -> &str {
            "text-pages"
        }

        fn rasterize(&self, source: &Path, pages_dir: &Path) -> pdf::Result<Vec<PathBuf>> {
            let content = fs::read_to_string(source)
                .map_err(|e| PdfError::Unreadable(e.to_string()))?;
            let mut pages = Vec::new();
            for (i, chunk) in content.split('\x0c').filter(|c| !c.trim().is_empty()).enumerate() {
                let path = pages_dir.join(pdf::page_image_name(i + 1));
                fs::write(&path, chunk)?;
                pages.push(path);
            }
            Ok(pages)
        }
    }

    /// Reads the "image" back as text; `unreadable` pages fail recognition.
    struct ReadBack;

    impl TextRecognizer for ReadBack {
        fn name(&self) -> &str {
            "read-back"
        }

        fn recognize(&self, image: &Path) -> ocr::Result<String> {
            let text = fs::read_to_string(image)?;
            if text.contains("unreadable") {
                return Err(OcrError::Recognition("blurred".to_string()));
            }
            Ok(text)
        }
    }

    fn pipeline(root: &Path) -> DocumentPipeline {
        DocumentPipeline::new(Box::new(TextPages), Box::new(ReadBack))
            .with_scratch_root(root.join("scratch"))
            .with_output_dir(root.join("csv"))
    }

    #[test]
    fn test_output_path() {
        let p = pipeline(Path::new("/data"));
        assert_eq!(
            p.output_path(Path::new("in/acme.pdf"), None),
            Path::new("/data/csv/acme_extracted.csv")
        );
        assert_eq!(
            p.output_path(Path::new("in/acme.pdf"), Some(Path::new("out.csv"))),
            Path::new("/data/csv/out.csv")
        );
        assert_eq!(
            p.output_path(Path::new("in/acme.pdf"), Some(Path::new("/elsewhere/x.csv"))),
            Path::new("/elsewhere/x.csv")
        );
    }

    #[test]
    fn test_process_multi_page() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("inv.pdf");
        fs::write(
            &source,
            "PO Number: 4521\nQty: 10\nUnit Price: 5.00\n\x0cNet Amount: 40.00\nDue Date: 12-Jan-24\n",
        )
        .unwrap();

        let output = pipeline(dir.path()).process(&source, None).unwrap();

        assert_eq!(output.page_count, 2);
        assert_eq!(output.csv_path, dir.path().join("csv").join("inv_extracted.csv"));
        assert_eq!(output.record.get(Field::PoNumber), "4521");
        assert_eq!(output.record.get(Field::NetAmount), "40.00");
        assert_eq!(output.record.get(Field::DueDate), "12-Jan-24");
        assert_eq!(output.warnings.len(), 1);

        let csv = fs::read_to_string(&output.csv_path).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(!dir.path().join("scratch").join("inv").exists());
    }

    #[test]
    fn test_unrecognizable_page_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("blurry.pdf");
        fs::write(&source, "unreadable smudge").unwrap();

        let output = pipeline(dir.path()).process(&source, None).unwrap();
        assert_eq!(output.page_count, 1);
        assert_eq!(output.record.get(Field::VendorName), "null");
    }

    #[test]
    fn test_zero_pages_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("empty.pdf");
        fs::write(&source, "   ").unwrap();

        let failure = pipeline(dir.path()).process(&source, None).unwrap_err();
        assert_eq!(failure.stage, Stage::Rasterizing);
        assert_eq!(failure.kind(), crate::FailureKind::NoPagesProduced);
        assert!(!dir.path().join("scratch").join("empty").exists());
    }

    #[test]
    fn test_missing_source_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let failure = pipeline(dir.path())
            .process(&dir.path().join("missing.pdf"), None)
            .unwrap_err();
        assert_eq!(failure.kind(), crate::FailureKind::SourceUnreadable);
        assert!(!dir.path().join("csv").join("missing_extracted.csv").exists());
    }
}

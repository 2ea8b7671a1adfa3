//! PDF rasterization.
//!
//! A [`Rasterizer`] turns a source PDF into ordered page images inside a
//! caller-provided directory. Two implementations are available: pulling
//! the scanned page images out of the PDF with lopdf, or rendering pages
//! with poppler's `pdftoppm`.

mod extractor;
mod poppler;

pub use extractor::EmbeddedImageRasterizer;
pub use poppler::PdftoppmRasterizer;

use std::path::{Path, PathBuf};

use crate::error::PdfError;
use crate::models::config::{PdfConfig, RasterizerKind};

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for turning a PDF into page images.
pub trait Rasterizer {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Write one image per page into `pages_dir` and return their paths in
    /// page order.
    ///
    /// An unreadable PDF is an error. A readable PDF without any usable page
    /// yields an empty list; deciding what that means is up to the caller.
    fn rasterize(&self, source: &Path, pages_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Build the rasterizer selected in configuration.
pub fn from_config(config: &PdfConfig) -> Box<dyn Rasterizer> {
    match config.rasterizer {
        RasterizerKind::Embedded => Box::new(EmbeddedImageRasterizer::new(config.max_pages)),
        RasterizerKind::Pdftoppm => {
            Box::new(PdftoppmRasterizer::new(config.render_dpi).with_max_pages(config.max_pages))
        }
    }
}

/// File name of the image for page `n` (1-based).
pub fn page_image_name(n: usize) -> String {
    format!("page-{}.png", n)
}

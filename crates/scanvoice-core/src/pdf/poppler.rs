//! Page rendering with poppler's `pdftoppm`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::{Rasterizer, Result};
use crate::error::PdfError;

/// Prefix of the images `pdftoppm` writes (`page-1.png`, `page-01.png`, ...).
const OUTPUT_PREFIX: &str = "page";

/// Renders every page to PNG by running `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    binary: String,
    dpi: u32,
    max_pages: usize,
}

impl PdftoppmRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self {
            binary: "pdftoppm".to_string(),
            dpi,
            max_pages: 0,
        }
    }

    /// Use a different executable.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Render at most `max_pages` pages (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn name(&self) -> &str {
        "pdftoppm"
    }

    fn rasterize(&self, source: &Path, pages_dir: &Path) -> Result<Vec<PathBuf>> {
        if !source.is_file() {
            return Err(PdfError::Unreadable(format!(
                "{} is not a file",
                source.display()
            )));
        }

        fs::create_dir_all(pages_dir)?;

        let mut command = Command::new(&self.binary);
        command.arg("-png").arg("-r").arg(self.dpi.to_string());
        if self.max_pages > 0 {
            command.arg("-l").arg(self.max_pages.to_string());
        }
        command.arg(source).arg(pages_dir.join(OUTPUT_PREFIX));

        debug!("Running {:?}", command);

        let output = command.output().map_err(|e| PdfError::ToolFailed {
            tool: self.binary.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PdfError::ToolFailed {
                tool: self.binary.clone(),
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        let pages = rendered_pages(pages_dir)?;
        debug!("pdftoppm rendered {} pages at {} dpi", pages.len(), self.dpi);
        Ok(pages)
    }
}

/// PNGs written by `pdftoppm`, ordered by page number.
fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(usize, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| page_number(&path).map(|n| (n, path)))
        .collect();

    pages.sort();
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

/// Page number of a `page-<n>.png` file; padding varies with page count.
fn page_number(path: &Path) -> Option<usize> {
    if !path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (prefix, number) = stem.rsplit_once('-')?;
    if prefix != OUTPUT_PREFIX {
        return None;
    }
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_number(Path::new("page-012.png")), Some(12));
        assert_eq!(page_number(Path::new("page-3.txt")), None);
        assert_eq!(page_number(Path::new("other-3.png")), None);
    }

    #[test]
    fn test_rendered_pages_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let pages = rendered_pages(dir.path()).unwrap();
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-2.png", "page-10.png"]);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdftoppmRasterizer::new(150)
            .rasterize(&dir.path().join("missing.pdf"), dir.path())
            .unwrap_err();
        assert!(matches!(err, PdfError::Unreadable(_)));
    }

    #[test]
    fn test_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("a.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();

        let err = PdftoppmRasterizer::new(150)
            .with_binary("scanvoice-test-no-such-pdftoppm")
            .rasterize(&pdf, &dir.path().join("images"))
            .unwrap_err();
        assert!(matches!(err, PdfError::ToolFailed { .. }));
    }
}

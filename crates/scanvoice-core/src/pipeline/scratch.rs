//! Per-document scratch namespaces.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

/// The scratch directory owned by one document: `<root>/<document-stem>/`.
///
/// Page images go to `images/`, per-page OCR text to `text/`, and the
/// aggregated text to `<stem>_combined.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchSpace {
    dir: PathBuf,
    stem: String,
}

impl ScratchSpace {
    /// Namespace of `source` under `root`. Nothing is created yet.
    pub fn for_document(root: &Path, source: &Path) -> Self {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "document".to_string());

        Self {
            dir: root.join(&stem),
            stem,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn images_dir(&self) -> PathBuf {
        self.dir.join("images")
    }

    pub fn text_dir(&self) -> PathBuf {
        self.dir.join("text")
    }

    /// OCR text of page `n` (1-based).
    pub fn page_text_path(&self, n: usize) -> PathBuf {
        self.text_dir().join(format!("page-{}_output.txt", n))
    }

    pub fn combined_text_path(&self) -> PathBuf {
        self.dir.join(format!("{}_combined.txt", self.stem))
    }

    /// Create the namespace directories.
    pub fn create(&self) -> io::Result<()> {
        fs::create_dir_all(self.images_dir())?;
        fs::create_dir_all(self.text_dir())?;
        trace!("Created scratch namespace {}", self.dir.display());
        Ok(())
    }

    /// Remove page images left by an earlier run.
    pub fn clear_images(&self) -> io::Result<()> {
        remove_dir_if_exists(&self.images_dir())?;
        fs::create_dir_all(self.images_dir())
    }

    /// Remove per-page and aggregated text.
    pub fn purge_text(&self) -> io::Result<()> {
        remove_dir_if_exists(&self.text_dir())?;
        match fs::remove_file(self.combined_text_path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Remove the whole namespace.
    pub fn release(&self) -> io::Result<()> {
        remove_dir_if_exists(&self.dir)?;
        trace!("Released scratch namespace {}", self.dir.display());
        Ok(())
    }
}

fn remove_dir_if_exists(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

//! Page-level access to PDF documents.
//!
//! The sampler only ever needs a page count and the text of individual pages,
//! so PDF parsing sits behind [`PdfReader`] / [`PageSource`]. [`LopdfReader`]
//! is the production implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to open {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("failed to extract text from page {page}: {reason}")]
    Extract { page: usize, reason: String },

    #[error("page {0} out of range")]
    PageOutOfRange(usize),
}

/// An opened document. Dropped as soon as the caller is done with it.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Text of the zero-based page `index`.
    fn page_text(&self, index: usize) -> Result<String, PdfError>;
}

pub trait PdfReader {
    fn open(&self, path: &Path) -> Result<Box<dyn PageSource>, PdfError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfReader;

struct LopdfDocument {
    doc: lopdf::Document,
    // lopdf numbers pages from 1; index i maps to page_numbers[i]
    page_numbers: Vec<u32>,
}

impl PdfReader for LopdfReader {
    fn open(&self, path: &Path) -> Result<Box<dyn PageSource>, PdfError> {
        let doc = lopdf::Document::load(path).map_err(|e| PdfError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        tracing::debug!("opened {} ({} pages)", path.display(), page_numbers.len());

        Ok(Box::new(LopdfDocument { doc, page_numbers }))
    }
}

impl PageSource for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PdfError> {
        let number = self
            .page_numbers
            .get(index)
            .ok_or(PdfError::PageOutOfRange(index))?;
        self.doc
            .extract_text(&[*number])
            .map_err(|e| PdfError::Extract {
                page: index,
                reason: e.to_string(),
            })
    }
}

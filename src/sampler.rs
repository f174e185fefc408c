//! Picks the pages of a document that best describe what it is about.
//!
//! Back matter is preferred: if one of the last pages opens with an `Index`
//! heading, everything from that page to the end is used. Otherwise the front
//! and back edges of the document are read. Whole documents are never read.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::Sampling;
use crate::pdf::{PageSource, PdfError, PdfReader};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub text: String,
    pub page_count: usize,
    /// Page the text starts at when an index page was found.
    pub index_page: Option<usize>,
    /// Zero-based pages that contributed to `text`, ascending.
    pub pages: Vec<usize>,
}

impl Sample {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A page opens an index when its first non-empty line reads `index`.
pub fn is_index_page(page_text: &str) -> bool {
    page_text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or(false, |line| line.to_lowercase() == "index")
}

#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    index_window: usize,
    edge_pages: usize,
}

impl Default for Sampler {
    fn default() -> Self {
        Sampler::new(&Sampling::default())
    }
}

impl Sampler {
    pub fn new(cfg: &Sampling) -> Self {
        Sampler {
            index_window: cfg.index_window,
            edge_pages: cfg.edge_pages,
        }
    }

    /// Opens `path` and samples it. Failures are logged and produce an empty
    /// sample so a bad file never stops a batch.
    pub fn sample_file(&self, reader: &dyn PdfReader, path: &Path) -> Sample {
        let doc = match reader.open(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                return Sample::default();
            }
        };

        match self.sample(doc.as_ref()) {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                Sample {
                    page_count: doc.page_count(),
                    ..Default::default()
                }
            }
        }
    }

    /// Every page is extracted at most once: pages read while looking for
    /// the index are reused when the text is assembled.
    pub fn sample(&self, doc: &dyn PageSource) -> Result<Sample, PdfError> {
        let page_count = doc.page_count();
        let window_start = page_count.saturating_sub(self.index_window);

        let mut scanned = Vec::new();
        let mut index_page = None;
        for page in window_start..page_count {
            let text = doc.page_text(page)?;
            let found = is_index_page(&text);
            scanned.push(text);
            if found {
                tracing::debug!("index page found at {}", page);
                index_page = Some(page);
                break;
            }
        }

        let pages = match index_page {
            Some(start) => (start..page_count).collect(),
            None => self.edge_page_set(page_count),
        };

        let mut text = String::new();
        for &page in &pages {
            match page.checked_sub(window_start).and_then(|i| scanned.get(i)) {
                Some(cached) => text.push_str(cached),
                None => text.push_str(&doc.page_text(page)?),
            }
        }

        Ok(Sample {
            text: text.to_lowercase(),
            page_count,
            index_page,
            pages,
        })
    }

    /// First and last `edge_pages` pages, each once, ascending.
    pub fn edge_page_set(&self, page_count: usize) -> Vec<usize> {
        let edge = self.edge_pages.min(page_count);
        let pages: BTreeSet<usize> = (0..edge).chain(page_count - edge..page_count).collect();
        pages.into_iter().collect()
    }
}

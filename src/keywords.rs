//! Rebuilds keyword profiles from the documents already filed in each folder.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::KEYWORDS_FILE;
use crate::categories::display_relative;
use crate::config::Config;
use crate::error::ShelfError;
use crate::fsops;
use crate::lexicon::{Profiler, Stopwords};
use crate::pdf::PdfReader;
use crate::sampler::Sampler;
use crate::stats::RefreshStats;

pub struct KeywordRefresher<'a> {
    reader: &'a dyn PdfReader,
    sampler: Sampler,
    profiler: Profiler,
    keyword_limit: usize,
}

impl<'a> KeywordRefresher<'a> {
    pub fn new(cfg: &Config, reader: &'a dyn PdfReader) -> Self {
        KeywordRefresher {
            reader,
            sampler: Sampler::new(&cfg.sampling),
            profiler: Profiler::new(Stopwords::with_extra(&cfg.profile.extra_stopwords)),
            keyword_limit: cfg.profile.keyword_limit,
        }
    }

    /// Overwrites the profile of every folder under `sorted_root` that
    /// directly holds PDFs. Folders without PDFs keep whatever they have.
    pub fn refresh(&self, sorted_root: &Path) -> Result<RefreshStats, ShelfError> {
        let mut stats = RefreshStats::default();
        if !sorted_root.is_dir() {
            tracing::warn!("nothing to refresh, {} does not exist", sorted_root.display());
            return Ok(stats);
        }

        for entry in WalkDir::new(sorted_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let pdfs = fsops::pdfs_in(entry.path())?;
            if pdfs.is_empty() {
                continue;
            }

            let relative = entry.path().strip_prefix(sorted_root).unwrap_or(entry.path());
            tracing::info!("processing: {}", display_relative(relative));
            if self.refresh_folder(entry.path(), &pdfs)? {
                stats.updated += 1;
            } else {
                stats.skipped += 1;
            }
        }

        Ok(stats)
    }

    fn refresh_folder(&self, folder: &Path, pdfs: &[PathBuf]) -> Result<bool, ShelfError> {
        let mut text = String::new();
        for pdf in pdfs {
            text.push_str(&self.sampler.sample_file(self.reader, pdf).text);
        }
        if text.trim().is_empty() {
            tracing::warn!("skipped {} (no readable text)", folder.display());
            return Ok(false);
        }

        let terms = self.profiler.top_terms(&text, self.keyword_limit);
        let mut body = terms.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }

        let keyword_path = folder.join(KEYWORDS_FILE);
        fs::write(&keyword_path, body).map_err(|e| ShelfError::io(&keyword_path, e))?;
        tracing::info!("updated {} with top {} terms", keyword_path.display(), terms.len());
        Ok(true)
    }
}

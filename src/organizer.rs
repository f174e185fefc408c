use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::categories::{self, display_relative};
use crate::classifier;
use crate::config::{Config, Library};
use crate::error::ShelfError;
use crate::fsops::{self, MoveOutcome};
use crate::pdf::PdfReader;
use crate::sampler::Sampler;
use crate::stats::{self, Outcome, RunStats};

/// Top-level split of the category tree by document length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Papers,
    Books,
}

impl Bucket {
    pub fn for_page_count(page_count: usize, book_page_threshold: usize) -> Self {
        if page_count >= book_page_threshold {
            Bucket::Books
        } else {
            Bucket::Papers
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Papers => "papers",
            Bucket::Books => "books",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Organizer<'a> {
    reader: &'a dyn PdfReader,
    sampler: Sampler,
    book_page_threshold: usize,
}

impl<'a> Organizer<'a> {
    pub fn new(cfg: &Config, reader: &'a dyn PdfReader) -> Self {
        Organizer {
            reader,
            sampler: Sampler::new(&cfg.sampling),
            book_page_threshold: cfg.routing.book_page_threshold,
        }
    }

    /// Files every PDF sitting directly in the intake folder.
    pub fn organize(&self, library: &Library) -> Result<RunStats, ShelfError> {
        let mut stats = RunStats::default();
        for path in intake_pdfs(&library.intake_dir)? {
            self.organize_one(&path, library)?.record(&mut stats);
        }

        tracing::info!(
            "sort finished: {} moved, {} skipped, {} failed",
            stats.moved,
            stats.skipped,
            stats.failed
        );
        Ok(stats)
    }

    fn organize_one(&self, path: &Path, library: &Library) -> Result<Outcome, ShelfError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!("processing: {}", file_name);

        let sample = self.sampler.sample_file(self.reader, path);
        if sample.is_blank() {
            stats::log_skip(&file_name, "empty or unreadable text");
            return Ok(Outcome::Failed);
        }

        let bucket = Bucket::for_page_count(sample.page_count, self.book_page_threshold);
        let bucket_root = library.sorted_dir.join(bucket.as_str());
        let categories = categories::load(&bucket_root)?;
        if categories.is_empty() {
            stats::log_skip(&file_name, format!("no keyword profiles under {}", bucket));
            return Ok(Outcome::Skipped);
        }

        let verdict = classifier::classify(&sample.text, &categories);
        let category = Path::new(bucket.as_str()).join(&verdict.category);
        let dest = library.sorted_dir.join(&category);
        tracing::debug!(
            "{} -> {} (score {:.3})",
            file_name,
            display_relative(&category),
            verdict.score
        );

        fs::create_dir_all(&dest).map_err(|e| ShelfError::io(&dest, e))?;
        match fsops::move_into(path, &dest)? {
            MoveOutcome::Collision => {
                stats::log_skip(
                    &file_name,
                    format!("already exists in '{}'", display_relative(&category)),
                );
                Ok(Outcome::Skipped)
            }
            MoveOutcome::Moved => {
                stats::log_moved(&file_name, display_relative(&category));
                catalog::rebuild(&library.sorted_dir, &library.catalog_file)?;
                Ok(Outcome::Moved)
            }
        }
    }
}

/// PDFs directly inside `intake_dir`, by file name. Creates the folder when
/// it is missing.
fn intake_pdfs(intake_dir: &Path) -> Result<Vec<PathBuf>, ShelfError> {
    fs::create_dir_all(intake_dir).map_err(|e| ShelfError::io(intake_dir, e))?;
    fsops::pdfs_in(intake_dir)
}

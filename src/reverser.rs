use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::catalog;
use crate::config::Library;
use crate::error::ShelfError;
use crate::fsops::{self, MoveOutcome};
use crate::is_pdf;
use crate::stats::{self, Outcome, RunStats};

/// Moves every filed PDF back into the intake folder. The catalog is emptied
/// only when something actually moved.
pub fn unsort(library: &Library) -> Result<RunStats, ShelfError> {
    let intake = &library.intake_dir;
    fs::create_dir_all(intake).map_err(|e| ShelfError::io(intake, e))?;

    let mut stats = RunStats::default();
    for path in filed_pdfs(library)? {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let outcome = match fsops::move_into(&path, intake)? {
            MoveOutcome::Collision => {
                stats::log_skip(&file_name, "already in intake");
                Outcome::Skipped
            }
            MoveOutcome::Moved => {
                stats::log_moved(&file_name, intake.display());
                Outcome::Moved
            }
        };
        outcome.record(&mut stats);
    }

    if stats.moved > 0 {
        tracing::info!(
            "moved {} PDFs back to '{}'",
            stats.moved,
            intake.display()
        );
        catalog::clear(&library.catalog_file)?;
    } else {
        tracing::info!("no PDFs found to move");
    }

    Ok(stats)
}

fn filed_pdfs(library: &Library) -> Result<Vec<PathBuf>, ShelfError> {
    if !library.sorted_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(&library.sorted_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_pdf(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::organizer::Organizer;
    use crate::pdf::fixtures::{TextReader, write_pages};
    use crate::KEYWORDS_FILE;
    use std::collections::BTreeSet;
    use std::path::Path;
    use tempfile::TempDir;

    fn library(root: &Path) -> Library {
        Library {
            intake_dir: root.join("unsorted"),
            sorted_dir: root.join("sorted"),
            catalog_file: root.join("library_index.txt"),
        }
    }

    fn names(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_unsort_moves_everything_back() {
        let dir = TempDir::new().unwrap();
        let lib = library(dir.path());
        fs::create_dir_all(lib.sorted_dir.join("papers/ml")).unwrap();
        fs::create_dir_all(lib.sorted_dir.join("books/history/rome")).unwrap();
        fs::write(lib.sorted_dir.join("papers/ml/a.pdf"), "a").unwrap();
        fs::write(lib.sorted_dir.join("books/history/rome/b.PDF"), "b").unwrap();
        fs::write(lib.sorted_dir.join("papers/ml/.keywords"), "gradient").unwrap();
        fs::write(&lib.catalog_file, "papers/\n").unwrap();

        let stats = unsort(&lib).unwrap();

        assert_eq!(stats.moved, 2);
        assert_eq!(names(&lib.intake_dir), BTreeSet::from(["a.pdf".to_string(), "b.PDF".to_string()]));
        assert!(lib.sorted_dir.join("papers/ml/.keywords").exists());
        assert_eq!(fs::read_to_string(&lib.catalog_file).unwrap(), "");
    }

    #[test]
    fn test_collision_in_intake_skipped() {
        let dir = TempDir::new().unwrap();
        let lib = library(dir.path());
        fs::create_dir_all(lib.sorted_dir.join("papers/ml")).unwrap();
        fs::create_dir_all(&lib.intake_dir).unwrap();
        fs::write(lib.sorted_dir.join("papers/ml/a.pdf"), "filed").unwrap();
        fs::write(lib.intake_dir.join("a.pdf"), "loose").unwrap();
        fs::write(&lib.catalog_file, "papers/\n").unwrap();

        let stats = unsort(&lib).unwrap();

        assert_eq!(stats.moved, 0);
        assert_eq!(stats.skipped, 1);
        assert_eq!(fs::read_to_string(lib.intake_dir.join("a.pdf")).unwrap(), "loose");
        // nothing moved, catalog left alone
        assert_eq!(fs::read_to_string(&lib.catalog_file).unwrap(), "papers/\n");
    }

    #[test]
    fn test_nothing_to_do() {
        let dir = TempDir::new().unwrap();
        let lib = library(dir.path());

        let stats = unsort(&lib).unwrap();
        assert_eq!(stats.seen(), 0);
        assert!(lib.intake_dir.is_dir());
        assert!(!lib.catalog_file.exists());
    }

    #[test]
    fn test_sort_then_unsort_round_trip() {
        let dir = TempDir::new().unwrap();
        let lib = library(dir.path());
        fs::create_dir_all(&lib.intake_dir).unwrap();
        for rel in ["papers/ml", "papers/nlp"] {
            fs::create_dir_all(lib.sorted_dir.join(rel)).unwrap();
        }
        fs::write(lib.sorted_dir.join("papers/ml").join(KEYWORDS_FILE), "gradient\n").unwrap();
        fs::write(lib.sorted_dir.join("papers/nlp").join(KEYWORDS_FILE), "token\n").unwrap();
        write_pages(&lib.intake_dir.join("one.pdf"), &["gradient"]);
        write_pages(&lib.intake_dir.join("two.pdf"), &["token"]);
        write_pages(&lib.intake_dir.join("three.pdf"), &["nothing relevant"]);
        let before = names(&lib.intake_dir);

        let sorted = Organizer::new(&Config::default(), &TextReader)
            .organize(&lib)
            .unwrap();
        assert_eq!(sorted.moved, 3);
        assert!(names(&lib.intake_dir).is_empty());

        let unsorted = unsort(&lib).unwrap();
        assert_eq!(unsorted.moved, 3);
        assert_eq!(names(&lib.intake_dir), before);
        assert_eq!(fs::read_to_string(&lib.catalog_file).unwrap(), "");
    }
}

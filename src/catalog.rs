//! The catalog is a plain-text listing of every category folder and the PDFs
//! directly inside it:
//!
//! ```text
//! papers/
//! papers/ml/
//!     attention.pdf
//! ```
//!
//! It is always regenerated from the tree, never patched.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::categories::display_relative;
use crate::error::ShelfError;
use crate::fsops;

pub fn render(sorted_root: &Path) -> Result<String, ShelfError> {
    let mut out = String::new();
    if !sorted_root.is_dir() {
        return Ok(out);
    }

    for entry in WalkDir::new(sorted_root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let relative = entry.path().strip_prefix(sorted_root).unwrap_or(entry.path());
        let _ = writeln!(out, "{}/", display_relative(relative));

        let files: Vec<String> = fsops::pdfs_in(entry.path())?
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        for file in files {
            let _ = writeln!(out, "    {}", file);
        }
    }

    Ok(out)
}

pub fn rebuild(sorted_root: &Path, catalog_file: &Path) -> Result<(), ShelfError> {
    let body = render(sorted_root)?;
    fs::write(catalog_file, body).map_err(|e| ShelfError::io(catalog_file, e))?;
    tracing::info!("library catalog updated: {}", catalog_file.display());
    Ok(())
}

pub fn clear(catalog_file: &Path) -> Result<(), ShelfError> {
    fs::write(catalog_file, "").map_err(|e| ShelfError::io(catalog_file, e))?;
    tracing::info!("cleared catalog: {}", catalog_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_render_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("sorted");
        touch(&root.join("papers/ml/b.pdf"));
        touch(&root.join("papers/ml/a.PDF"));
        touch(&root.join("papers/ml/.keywords"));
        touch(&root.join("papers/ml/notes.txt"));
        touch(&root.join("books/history/rome.pdf"));
        touch(&root.join("stray.pdf"));

        let body = render(&root).unwrap();
        assert_eq!(
            body,
            "books/\nbooks/history/\n    rome.pdf\npapers/\npapers/ml/\n    a.PDF\n    b.pdf\n"
        );
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("sorted");
        let catalog = dir.path().join("library_index.txt");
        touch(&root.join("papers/nlp/x.pdf"));
        fs::create_dir_all(root.join("books")).unwrap();

        rebuild(&root, &catalog).unwrap();
        let first = fs::read(&catalog).unwrap();
        rebuild(&root, &catalog).unwrap();
        assert_eq!(first, fs::read(&catalog).unwrap());
    }

    #[test]
    fn test_rebuild_overwrites() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("sorted");
        let catalog = dir.path().join("library_index.txt");
        fs::create_dir_all(root.join("papers")).unwrap();
        fs::write(&catalog, "stale line\n").unwrap();

        rebuild(&root, &catalog).unwrap();
        assert_eq!(fs::read_to_string(&catalog).unwrap(), "papers/\n");
    }

    #[test]
    fn test_missing_root_renders_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(render(&dir.path().join("nope")).unwrap(), "");
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("library_index.txt");
        fs::write(&catalog, "papers/\n").unwrap();

        clear(&catalog).unwrap();
        assert_eq!(fs::read_to_string(&catalog).unwrap(), "");
    }
}

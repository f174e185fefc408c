use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::KEYWORDS_FILE;
use crate::error::ShelfError;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Folder relative to the tree it was loaded from. Empty for the root.
    pub path: PathBuf,
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(path: impl Into<PathBuf>, keywords: Vec<String>) -> Self {
        Category {
            path: path.into(),
            keywords,
        }
    }

    /// `/`-separated name, `.` for the root.
    pub fn name(&self) -> String {
        display_relative(&self.path)
    }
}

pub fn display_relative(path: &Path) -> String {
    let parts: Vec<_> = path.iter().map(|c| c.to_string_lossy()).collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Keyword lines of a profile file: trimmed, lower-cased, blanks dropped.
pub fn parse_keywords(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Every folder under `root` (root included) holding a keyword profile, in
/// file-name order of a depth-first walk. A missing root has no categories.
pub fn load(root: &Path) -> Result<Vec<Category>, ShelfError> {
    let mut categories = Vec::new();
    if !root.is_dir() {
        tracing::debug!("category root {} does not exist", root.display());
        return Ok(categories);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let keyword_path = entry.path().join(KEYWORDS_FILE);
        if !keyword_path.is_file() {
            continue;
        }

        let contents =
            fs::read_to_string(&keyword_path).map_err(|e| ShelfError::io(&keyword_path, e))?;
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let category = Category::new(relative, parse_keywords(&contents));
        tracing::debug!("loaded {} keywords for {}", category.keywords.len(), category.name());
        categories.push(category);
    }

    Ok(categories)
}

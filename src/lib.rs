use std::error::Error;
use std::path::Path;

pub mod catalog;
pub mod categories;
pub mod classifier;
pub mod config;
pub mod error;
pub mod fsops;
pub mod keywords;
pub mod lexicon;
pub mod organizer;
pub mod pdf;
pub mod reverser;
pub mod sampler;
pub mod stats;

/// File name of the per-folder keyword profile.
pub const KEYWORDS_FILE: &str = ".keywords";

pub fn unpack_error(err: &dyn Error) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

/// True when the path's file name ends in `.pdf`, ignoring case.
pub fn is_pdf(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.to_lowercase().ends_with(".pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("a/b/paper.pdf")));
        assert!(is_pdf(Path::new("SCAN.PDF")));
        assert!(!is_pdf(Path::new("notes.txt")));
        assert!(!is_pdf(Path::new("pdf")));
        assert!(!is_pdf(Path::new("archive.pdf.zip")));
    }
}

use std::path::{Path, PathBuf};

use crate::categories::Category;

/// Where a document goes when no profile matches it at all.
pub const FALLBACK_CATEGORY: &str = "misc/unknown";

/// Share of `keywords` occurring anywhere in `text`. Matching is plain
/// substring containment, so `net` matches inside `network`.
pub fn score(text: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let matched = keywords.iter().filter(|k| text.contains(k.as_str())).count();
    matched as f64 / keywords.len() as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub category: PathBuf,
    pub score: f64,
}

impl Verdict {
    pub fn is_fallback(&self) -> bool {
        self.category == Path::new(FALLBACK_CATEGORY)
    }
}

/// Best scoring category. A later category only wins with a strictly higher
/// score, so ties go to whichever came first in `categories`.
pub fn classify(text: &str, categories: &[Category]) -> Verdict {
    let mut best = Verdict {
        category: PathBuf::from(FALLBACK_CATEGORY),
        score: 0.0,
    };

    for category in categories {
        if category.keywords.is_empty() {
            continue;
        }
        let score = score(text, &category.keywords);
        tracing::debug!("{} scored {:.3}", category.name(), score);
        if score > best.score {
            best = Verdict {
                category: category.path.clone(),
                score,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(path: &str, keywords: &[&str]) -> Category {
        Category::new(path, keywords.iter().map(|k| k.to_string()).collect())
    }

    #[test]
    fn test_best_ratio_wins() {
        let categories = vec![
            category("nlp", &["token", "embedding"]),
            category("ml", &["gradient", "loss", "epoch"]),
        ];
        let verdict = classify("the gradient of the loss w.r.t. each embedding", &categories);

        assert_eq!(verdict.category, PathBuf::from("ml"));
        assert!((verdict.score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let categories = vec![
            category("graphics", &["shader", "raster"]),
            category("games", &["shader", "engine"]),
        ];
        assert_eq!(classify("a shader", &categories).category, PathBuf::from("graphics"));

        let reversed: Vec<Category> = categories.into_iter().rev().collect();
        assert_eq!(classify("a shader", &reversed).category, PathBuf::from("games"));
    }

    #[test]
    fn test_fallback_without_categories() {
        let verdict = classify("anything", &[]);
        assert!(verdict.is_fallback());
        assert_eq!(verdict.score, 0.0);
    }

    #[test]
    fn test_fallback_when_all_profiles_empty() {
        let categories = vec![category("a", &[]), category("b", &[])];
        assert!(classify("anything", &categories).is_fallback());
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let categories = vec![category("bio", &["enzyme", "protein"])];
        assert!(classify("compilers and parsers", &categories).is_fallback());
    }

    #[test]
    fn test_substring_matching_is_kept() {
        assert_eq!(score("neural networks", &["net".to_string()]), 1.0);
        assert_eq!(score("anything", &[]), 0.0);
    }

    #[test]
    fn test_empty_profile_skipped_even_if_first() {
        let categories = vec![category("blank", &[]), category("os", &["kernel"])];
        assert_eq!(classify("kernel", &categories).category, PathBuf::from("os"));
    }
}

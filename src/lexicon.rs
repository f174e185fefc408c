//! Term-frequency profiles of sampled text.

use std::collections::{HashMap, HashSet};

const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

// Boilerplate that shows up in every paper or book regardless of subject.
const DOCUMENT_NOISE: &[&str] = &[
    "fig", "figure", "table", "et", "al", "using", "based", "results", "thus", "therefore",
    "also", "chapter", "section", "page", "figures", "tables", "data", "analysis",
    "methodology", "one", "two", "three", "four", "five", "first", "second", "third", "fourth",
    "fifth", "firstly", "secondly", "thirdly", "fourthly", "fifthly",
];

/// Tokens this short never make it into a profile.
const MIN_TERM_CHARS: usize = 3;

/// Words excluded from profiles.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Stopwords::with_extra(&[] as &[&str])
    }
}

impl Stopwords {
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Self {
        let words = ENGLISH_STOPWORDS
            .iter()
            .chain(DOCUMENT_NOISE)
            .map(|w| w.to_string())
            .chain(extra.iter().map(|w| w.as_ref().trim().to_lowercase()))
            .collect();
        Stopwords { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Profiler {
    stopwords: Stopwords,
}

impl Profiler {
    pub fn new(stopwords: Stopwords) -> Self {
        Profiler { stopwords }
    }

    /// Terms of `text` ranked by descending count.
    ///
    /// Equal counts stay in the order the terms were first seen. That order
    /// falls out of how terms are counted and says nothing about relevance.
    pub fn profile(&self, text: &str) -> Vec<(String, usize)> {
        let cleaned: String = text
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect();

        // term -> (first seen, count)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for token in cleaned.split_whitespace() {
            if token.chars().count() < MIN_TERM_CHARS || self.stopwords.contains(token) {
                continue;
            }
            let seen = counts.len();
            counts.entry(token).or_insert((seen, 0)).1 += 1;
        }

        let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (a_seen, a_count)), (_, (b_seen, b_count))| {
            b_count.cmp(a_count).then(a_seen.cmp(b_seen))
        });
        ranked
            .into_iter()
            .map(|(term, (_, count))| (term.to_string(), count))
            .collect()
    }

    pub fn top_terms(&self, text: &str, limit: usize) -> Vec<String> {
        self.profile(text)
            .into_iter()
            .take(limit)
            .map(|(term, _)| term)
            .collect()
    }
}

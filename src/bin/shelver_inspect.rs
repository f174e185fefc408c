use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shelver::categories::{self, display_relative};
use shelver::classifier;
use shelver::config::Config;
use shelver::lexicon::{Profiler, Stopwords};
use shelver::organizer::Bucket;
use shelver::pdf::{LopdfReader, PdfReader};
use shelver::sampler::{Sample, Sampler};
use std::path::{Path, PathBuf};

const TOP_TERMS: usize = 25;

#[derive(Parser)]
#[command(name = "shelver-inspect")]
#[command(about = "Show how a PDF would be sampled and classified, without moving it")]
struct Cli {
    pdf_path: String,
    #[arg(short = 'c', long = "config")]
    config_path: Option<String>,
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct Inspection {
    filename: String,
    page_count: usize,
    index_page: Option<usize>,
    sampled_pages: Vec<usize>,
    top_terms: Vec<String>,
    bucket: Option<String>,
    category: Option<String>,
    score: Option<f64>,
}

fn inspect(path: &Path, cfg: &Config) -> Result<Inspection> {
    let doc = LopdfReader
        .open(path)
        .with_context(|| format!("Failed to load PDF: {}", path.display()))?;
    let Sample {
        text,
        page_count,
        index_page,
        pages,
    } = Sampler::new(&cfg.sampling).sample(doc.as_ref())?;
    drop(doc);

    let profiler = Profiler::new(Stopwords::with_extra(&cfg.profile.extra_stopwords));
    let mut inspection = Inspection {
        filename: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string(),
        page_count,
        index_page,
        sampled_pages: pages,
        top_terms: profiler.top_terms(&text, TOP_TERMS),
        bucket: None,
        category: None,
        score: None,
    };

    if text.trim().is_empty() {
        return Ok(inspection);
    }

    let bucket = Bucket::for_page_count(page_count, cfg.routing.book_page_threshold);
    let loaded = categories::load(&cfg.library.sorted_dir.join(bucket.as_str()))?;
    inspection.bucket = Some(bucket.to_string());
    if !loaded.is_empty() {
        let verdict = classifier::classify(&text, &loaded);
        inspection.category = Some(display_relative(&verdict.category));
        inspection.score = Some(verdict.score);
    }

    Ok(inspection)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = Path::new(&cli.pdf_path);

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }

    let config_path = cli.config_path.as_ref().map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref())?;
    let inspection = inspect(path, &cfg)?;

    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        println!("{}", serde_json::to_string(&inspection)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_rejects_non_pdf() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, "plain text").unwrap();

        assert!(inspect(&path, &Config::default()).is_err());
    }

    #[test]
    fn test_inspection_serializes_missing_fields_as_null() {
        let inspection = Inspection {
            filename: "a.pdf".to_string(),
            page_count: 0,
            index_page: None,
            sampled_pages: vec![],
            top_terms: vec![],
            bucket: None,
            category: None,
            score: None,
        };
        let json = serde_json::to_value(&inspection).unwrap();
        assert!(json["category"].is_null());
        assert_eq!(json["page_count"], 0);
    }
}

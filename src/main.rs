use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shelver::catalog;
use shelver::config::{Cli, Command, Config};
use shelver::keywords::KeywordRefresher;
use shelver::organizer::Organizer;
use shelver::pdf::LopdfReader;
use shelver::reverser;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_report<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}

fn main() -> Result<()> {
    // ${VAR} references in the config may come from a local .env
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    init_tracing(args.json_logs);

    let config_path = args.config_path.as_ref().map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref()).context("failed to load config file")?;
    let library = &cfg.library;
    let reader = LopdfReader;

    match args.command {
        Command::Sort { json } => {
            let stats = Organizer::new(&cfg, &reader)
                .organize(library)
                .context("sort aborted")?;
            if json {
                print_report(&stats)?;
            }
        }
        Command::Unsort { json } => {
            let stats = reverser::unsort(library).context("unsort aborted")?;
            if stats.moved > 0 {
                println!(
                    "Successfully moved {} PDFs to '{}'",
                    stats.moved,
                    library.intake_dir.display()
                );
            } else {
                println!("No PDFs found to move!");
            }
            if json {
                print_report(&stats)?;
            }
        }
        Command::RefreshKeywords { json } => {
            tracing::info!("refreshing keywords based on actual PDF content");
            let stats = KeywordRefresher::new(&cfg, &reader)
                .refresh(&library.sorted_dir)
                .context("keyword refresh aborted")?;
            if json {
                print_report(&stats)?;
            }
        }
        Command::Catalog => {
            catalog::rebuild(&library.sorted_dir, &library.catalog_file)
                .context("failed to rebuild catalog")?;
        }
    }

    Ok(())
}

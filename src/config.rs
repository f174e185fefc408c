use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "shelver")]
#[command(about = "Files PDFs into a keyword-profiled folder tree", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Classify every PDF in the intake folder and move it into the tree
    Sort {
        #[arg(long)]
        json: bool,
    },
    /// Move every filed PDF back to the intake folder and clear the catalog
    Unsort {
        #[arg(long)]
        json: bool,
    },
    /// Regenerate each category's keyword profile from the PDFs filed there
    RefreshKeywords {
        #[arg(long)]
        json: bool,
    },
    /// Rewrite the catalog from the current folder contents
    Catalog,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".shelver")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Library {
    pub intake_dir: PathBuf,
    pub sorted_dir: PathBuf,
    pub catalog_file: PathBuf,
}

impl Default for Library {
    fn default() -> Self {
        Library {
            intake_dir: PathBuf::from("./unsorted"),
            sorted_dir: PathBuf::from("./sorted"),
            catalog_file: PathBuf::from("./library_index.txt"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Sampling {
    /// How many trailing pages are searched for an index heading.
    pub index_window: usize,
    /// Pages taken from each end when there is no index.
    pub edge_pages: usize,
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling {
            index_window: 50,
            edge_pages: 20,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub keyword_limit: usize,
    pub extra_stopwords: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            keyword_limit: 200,
            extra_stopwords: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Routing {
    pub book_page_threshold: usize,
}

impl Default for Routing {
    fn default() -> Self {
        Routing {
            book_page_threshold: 100,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub library: Library,
    pub sampling: Sampling,
    pub profile: Profile,
    pub routing: Routing,
}

impl Config {
    /// Loads `path` when given. Without one, the default location is tried and
    /// built-in defaults are used if nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Config::load_config(path),
            None => {
                let path = default_config_path();
                if path.is_file() {
                    Config::load_config(&path)
                } else {
                    tracing::debug!("no config at {}, using defaults", path.display());
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_config(path: &Path) -> Result<Config> {
        let yaml_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Config> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        // an empty document deserializes to null rather than a mapping
        if yaml_with_env.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!("environment variable '{}' not found", var_name);
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}

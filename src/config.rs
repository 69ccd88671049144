use colored::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    /// Defaults to `<docs_dir>/search` when unset
    #[serde(default)]
    pub search_dir: Option<PathBuf>,
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("./html")
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("./doxfind-cache.json")
}

fn default_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            search_dir: None,
            cache_file: default_cache_file(),
            limit: default_limit(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = PathBuf::from("doxfind.toml");

        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        return config;
                    }
                    Err(e) => {
                        eprintln!("{} Failed to parse doxfind.toml: {}", "⚠️".yellow(), e);
                        eprintln!("   Using default configuration");
                    }
                },
                Err(e) => {
                    eprintln!("{} Failed to read doxfind.toml: {}", "⚠️".yellow(), e);
                    eprintln!("   Using default configuration");
                }
            }
        }

        Config::default()
    }

    /// The directory holding the searchData chunk files
    pub fn search_dir(&self) -> PathBuf {
        match &self.search_dir {
            Some(dir) => dir.clone(),
            None => self.docs_dir.join("search"),
        }
    }

    /// Resolve a target url (relative to the search directory, as emitted by
    /// the generator) against the docs tree
    pub fn resolve_page(&self, url: &str) -> PathBuf {
        match url.strip_prefix("../") {
            Some(rest) => self.docs_dir.join(rest),
            None => self.search_dir().join(url),
        }
    }
}

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{collections::HashMap, fs, path::Path};

use crate::index::SearchEntry;

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry {
    pub hash: String,
    pub entries: Vec<SearchEntry>,
}

/// Map from chunk file name to its parsed contents
pub type Cache = HashMap<String, CacheEntry>;

pub fn load_cache(cache_path: &Path) -> Cache {
    if cache_path.exists() {
        let content = fs::read_to_string(cache_path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        HashMap::new()
    }
}

pub fn save_cache(cache_path: &Path, cache: &Cache) {
    let json = serde_json::to_string(cache).unwrap_or_default();
    fs::write(cache_path, json).unwrap_or_else(|e| {
        use colored::*;
        eprintln!("{} Failed to save cache: {}", "⚠️".yellow(), e);
    });
}

pub fn compute_hash(path: &Path) -> String {
    let content = fs::read(path).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// A cached chunk is reusable when its stored hash still matches the file
pub fn cached_entries<'a>(
    name: &str,
    path: &Path,
    cache: &'a Cache,
    force: bool,
) -> Option<&'a [SearchEntry]> {
    if force {
        return None;
    }

    let entry = cache.get(name)?;
    if compute_hash(path) == entry.hash {
        Some(&entry.entries)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Target;

    fn sample_entries() -> Vec<SearchEntry> {
        vec![SearchEntry {
            key: "size".to_string(),
            label: "size".to_string(),
            targets: vec![Target {
                url: "classVector.html".to_string(),
                fragment: "a1".to_string(),
                owner: "Vector".to_string(),
                description: "size()".to_string(),
            }],
        }]
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("doxfind-cache.json");

        let mut cache = Cache::new();
        cache.insert(
            "functions_s.js".to_string(),
            CacheEntry {
                hash: "abc".to_string(),
                entries: sample_entries(),
            },
        );

        save_cache(&cache_path, &cache);
        let loaded = load_cache(&cache_path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["functions_s.js"].entries, sample_entries());
    }

    #[test]
    fn test_load_missing_cache_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_cache(&dir.path().join("missing.json")).is_empty());
    }

    #[test]
    fn test_cached_entries_checks_hash() {
        let dir = tempfile::tempdir().unwrap();
        let chunk_path = dir.path().join("functions_s.js");
        fs::write(&chunk_path, "var searchData=\n[\n];\n").unwrap();

        let mut cache = Cache::new();
        cache.insert(
            "functions_s.js".to_string(),
            CacheEntry {
                hash: compute_hash(&chunk_path),
                entries: sample_entries(),
            },
        );

        assert!(cached_entries("functions_s.js", &chunk_path, &cache, false).is_some());
        assert!(cached_entries("functions_s.js", &chunk_path, &cache, true).is_none());

        fs::write(&chunk_path, "var searchData=\n[];\n").unwrap();
        assert!(cached_entries("functions_s.js", &chunk_path, &cache, false).is_none());
    }
}

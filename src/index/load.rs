use colored::*;
use std::{collections::HashMap, fs, path::PathBuf};

use super::types::{SearchEntry, SearchIndex};
use crate::cache::{Cache, CacheEntry, cached_entries, compute_hash, load_cache, save_cache};
use crate::config::Config;
use crate::parse::parse_chunk;

#[derive(Debug)]
pub struct LoadContext {
    pub config: Config,
    pub verbose: bool,
    pub force: bool,
}

/// List the chunk files of the search directory, sorted by name so the merged
/// table order is stable across runs
pub fn chunk_files(config: &Config) -> Result<Vec<(String, PathBuf)>, String> {
    let search_dir = config.search_dir();

    if !search_dir.is_dir() {
        return Err(format!(
            "Search directory not found: {}",
            search_dir.display()
        ));
    }

    let mut chunks = Vec::new();
    let dir = fs::read_dir(&search_dir)
        .map_err(|e| format!("Failed to read {}: {}", search_dir.display(), e))?;

    for entry in dir {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "js") {
            let name = entry.file_name().to_string_lossy().to_string();
            chunks.push((name, path));
        }
    }

    chunks.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(chunks)
}

/// Load every chunk of the docs tree's search directory and merge them into
/// one index, reusing cached parses for unchanged files
pub fn load_index(ctx: &LoadContext) -> Result<SearchIndex, String> {
    let start = std::time::Instant::now();

    let chunks = chunk_files(&ctx.config)?;
    if chunks.is_empty() {
        return Err(format!(
            "No searchData chunks (*.js) in {}",
            ctx.config.search_dir().display()
        ));
    }

    let cache_path = &ctx.config.cache_file;
    let mut cache = load_cache(cache_path);

    let mut merged: Vec<SearchEntry> = Vec::new();
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut reparsed = 0;
    let mut from_cache = 0;

    for (name, path) in &chunks {
        let entries = match cached_entries(name, path, &cache, ctx.force) {
            Some(entries) => {
                from_cache += 1;
                entries.to_vec()
            }
            None => {
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                let entries =
                    parse_chunk(&text).map_err(|e| format!("{}: {}", name, e))?;
                reparsed += 1;
                cache.insert(
                    name.clone(),
                    CacheEntry {
                        hash: compute_hash(path),
                        entries: entries.clone(),
                    },
                );
                entries
            }
        };

        for entry in entries {
            if let Some(other_chunk) = seen.get(&entry.key) {
                return Err(format!(
                    "Duplicate key '{}' in {} (already defined in {})",
                    entry.key, name, other_chunk
                ));
            }
            seen.insert(entry.key.clone(), name.clone());
            merged.push(entry);
        }
    }

    // Drop cache rows for chunks that no longer exist
    cache.retain(|name, _| chunks.iter().any(|(n, _)| n == name));
    save_cache(cache_path, &cache);

    let index = SearchIndex::build(merged);

    if ctx.verbose {
        eprintln!("📚 Search index loaded:");
        eprintln!("   Chunks:  {} ({} cached, {} parsed)", chunks.len(), from_cache, reparsed);
        eprintln!("   Entries: {}", index.entries.len());
        eprintln!("   Owners:  {}", index.owners.len());
        eprintln!("   Total time: {:?}", start.elapsed());
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const CHUNK_A: &str = "var searchData=\n[\n  ['at',['at',['../classestl_1_1vector_1_1Vector.html#a10',1,'estl::vector::Vector::at(size_type i)']]]\n];\n";
    const CHUNK_B: &str = "var searchData=\n[\n  ['size',['size',['../classestl_1_1vector_1_1Vector.html#a11',1,'estl::vector::Vector::size()']]]\n];\n";

    fn write_docs_tree(root: &Path) -> Config {
        let search_dir = root.join("html/search");
        fs::create_dir_all(&search_dir).unwrap();
        fs::write(search_dir.join("functions_a.js"), CHUNK_A).unwrap();
        fs::write(search_dir.join("functions_s.js"), CHUNK_B).unwrap();

        Config {
            docs_dir: root.join("html"),
            search_dir: None,
            cache_file: root.join("doxfind-cache.json"),
            limit: 20,
        }
    }

    fn ctx(config: Config, force: bool) -> LoadContext {
        LoadContext {
            config,
            verbose: false,
            force,
        }
    }

    #[test]
    fn test_load_merges_chunks_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_docs_tree(dir.path());

        let index = load_index(&ctx(config, false)).expect("load should succeed");
        assert_eq!(index.entries.len(), 2);
        assert_eq!(index.entries[0].key, "at");
        assert_eq!(index.entries[1].key, "size");
    }

    #[test]
    fn test_load_uses_cache_for_unchanged_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_docs_tree(dir.path());

        load_index(&ctx(config.clone(), false)).unwrap();
        let cache = load_cache(&config.cache_file);
        assert_eq!(cache.len(), 2);

        // A second load must produce the same index from cache
        let index = load_index(&ctx(config, false)).unwrap();
        assert_eq!(index.entries.len(), 2);
    }

    #[test]
    fn test_load_drops_stale_cache_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_docs_tree(dir.path());

        load_index(&ctx(config.clone(), false)).unwrap();
        fs::remove_file(config.search_dir().join("functions_s.js")).unwrap();
        load_index(&ctx(config.clone(), false)).unwrap();

        let cache = load_cache(&config.cache_file);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("functions_a.js"));
    }

    #[test]
    fn test_load_rejects_duplicate_keys_across_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_docs_tree(dir.path());
        fs::write(config.search_dir().join("functions_z.js"), CHUNK_A).unwrap();

        let err = load_index(&ctx(config, false)).unwrap_err();
        assert!(err.contains("Duplicate key 'at'"), "unexpected error: {}", err);
    }

    #[test]
    fn test_load_reports_missing_search_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            docs_dir: dir.path().join("html"),
            search_dir: None,
            cache_file: dir.path().join("doxfind-cache.json"),
            limit: 20,
        };

        let err = load_index(&ctx(config, false)).unwrap_err();
        assert!(err.contains("not found"), "unexpected error: {}", err);
    }
}

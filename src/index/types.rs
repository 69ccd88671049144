use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One overload link inside a search entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Documentation page path, relative to the docs root
    pub url: String,
    /// Anchor id inside that page
    pub fragment: String,
    /// Owning class, e.g. `estl::matrix::Matrix`
    pub owner: String,
    /// Signature text shown for this overload (empty for owner-only targets)
    pub description: String,
}

/// One record of the searchData table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Obfuscated anchor identifier, e.g. `operator_2a`
    pub key: String,
    /// Human-readable symbol name, e.g. `operator*`
    pub label: String,
    /// One target per overload, in source order
    pub targets: Vec<Target>,
}

/// Index over all entries for fast lookups
#[derive(Debug)]
pub struct SearchIndex {
    /// Map from key to entry index
    pub keys: HashMap<String, usize>,
    /// Map from lowercased label to entry indices
    pub labels: HashMap<String, Vec<usize>>,
    /// Map from owning class to entry indices (deduplicated, in entry order)
    pub owners: HashMap<String, Vec<usize>>,
    /// The entries themselves, in chunk-file order
    pub entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Build the lookup maps from a merged entry list
    pub fn build(entries: Vec<SearchEntry>) -> Self {
        let mut keys = HashMap::new();
        let mut labels: HashMap<String, Vec<usize>> = HashMap::new();
        let mut owners: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            keys.insert(entry.key.clone(), idx);
            labels
                .entry(entry.label.to_lowercase())
                .or_default()
                .push(idx);

            for target in &entry.targets {
                let indices = owners.entry(target.owner.clone()).or_default();
                if indices.last() != Some(&idx) {
                    indices.push(idx);
                }
            }
        }

        SearchIndex {
            keys,
            labels,
            owners,
            entries,
        }
    }

    /// Lookup an entry by its obfuscated key
    pub fn get(&self, key: &str) -> Option<&SearchEntry> {
        self.keys.get(key).map(|idx| &self.entries[*idx])
    }

    /// Lookup entries by exact label (case-insensitive)
    pub fn get_by_label(&self, label: &str) -> Vec<&SearchEntry> {
        self.labels
            .get(&label.to_lowercase())
            .map(|indices| indices.iter().map(|idx| &self.entries[*idx]).collect())
            .unwrap_or_default()
    }

    /// Search labels the way the documentation widget does: case-insensitive,
    /// prefix matches ranked before substring matches, stable order within
    /// each rank
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let query_lower = query.to_lowercase();
        let mut prefix = Vec::new();
        let mut substring = Vec::new();

        for entry in &self.entries {
            let label_lower = entry.label.to_lowercase();
            if label_lower.starts_with(&query_lower) {
                prefix.push(entry);
            } else if label_lower.contains(&query_lower) {
                substring.push(entry);
            }
        }

        prefix.extend(substring);
        prefix
    }

    /// All entries with at least one target owned by the given class
    pub fn entries_for_owner(&self, owner: &str) -> Vec<&SearchEntry> {
        self.owners
            .get(owner)
            .map(|indices| indices.iter().map(|idx| &self.entries[*idx]).collect())
            .unwrap_or_default()
    }

    /// All owning classes, sorted
    pub fn owner_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.owners.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(owner: &str, desc: &str) -> Target {
        Target {
            url: format!("class{}.html", owner.replace("::", "_1_1")),
            fragment: "a0123456789abcdef".to_string(),
            owner: owner.to_string(),
            description: desc.to_string(),
        }
    }

    fn sample_index() -> SearchIndex {
        SearchIndex::build(vec![
            SearchEntry {
                key: "operator_2a".to_string(),
                label: "operator*".to_string(),
                targets: vec![
                    target("estl::matrix::Matrix", "operator*(const Matrix &lhs)"),
                    target("estl::vector::Vector", "operator*(const Vector &lhs)"),
                ],
            },
            SearchEntry {
                key: "operator_2a_3d".to_string(),
                label: "operator*=".to_string(),
                targets: vec![target("estl::matrix::Matrix", "")],
            },
            SearchEntry {
                key: "size".to_string(),
                label: "size".to_string(),
                targets: vec![target("estl::vector::Vector", "")],
            },
        ])
    }

    #[test]
    fn test_key_lookup() {
        let index = sample_index();
        let entry = index.get("operator_2a").expect("key should resolve");
        assert_eq!(entry.label, "operator*");
        assert!(index.get("operator_2f").is_none());
    }

    #[test]
    fn test_label_lookup_is_case_insensitive() {
        let index = sample_index();
        assert_eq!(index.get_by_label("SIZE").len(), 1);
    }

    #[test]
    fn test_search_ranks_prefix_before_substring() {
        let index = sample_index();
        let hits = index.search("operator*");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].label, "operator*");
        assert_eq!(hits[1].label, "operator*=");

        // "size" only matches as a prefix of itself
        let hits = index.search("si");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "size");
    }

    #[test]
    fn test_entries_for_owner() {
        let index = sample_index();
        let matrix = index.entries_for_owner("estl::matrix::Matrix");
        assert_eq!(matrix.len(), 2);
        let vector = index.entries_for_owner("estl::vector::Vector");
        assert_eq!(vector.len(), 2);
        assert!(index.entries_for_owner("estl::tree::Tree").is_empty());
    }

    #[test]
    fn test_owner_names_sorted() {
        let index = sample_index();
        assert_eq!(
            index.owner_names(),
            vec!["estl::matrix::Matrix", "estl::vector::Vector"]
        );
    }
}

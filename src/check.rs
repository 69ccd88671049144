//! Index lint: the sanity checks a generated search index must satisfy
//!
//! - keys are unique within and across chunks, and agree with their labels
//! - every target link resolves to an existing anchor in an existing page
//! - re-emitting a parsed chunk reproduces the file byte-for-byte

use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::PathBuf,
};

use crate::config::Config;
use crate::emit::emit_chunk;
use crate::index::chunk_files;
use crate::keys::{deobfuscate, obfuscate};
use crate::parse::parse_chunk;

lazy_static! {
    /// Matches id="..." / name="..." anchor attributes in a generated page
    static ref ANCHOR_RE: Regex =
        Regex::new(r#"(?:id|name)\s*=\s*["']([^"']+)["']"#).expect("anchor regex is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug)]
pub struct Finding {
    pub severity: Severity,
    /// Chunk file the finding belongs to
    pub chunk: String,
    /// Entry key or target url, whichever locates the problem
    pub context: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
    pub chunks_checked: usize,
    pub entries_checked: usize,
    pub pages_scanned: usize,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }

    fn error(&mut self, chunk: &str, context: &str, message: String) {
        self.findings.push(Finding {
            severity: Severity::Error,
            chunk: chunk.to_string(),
            context: context.to_string(),
            message,
        });
    }

    fn warning(&mut self, chunk: &str, context: &str, message: String) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            chunk: chunk.to_string(),
            context: context.to_string(),
            message,
        });
    }
}

/// Anchor sets per page, read lazily and at most once; `None` marks a page
/// that exists but could not be read
struct PageAnchors {
    cache: HashMap<PathBuf, Option<HashSet<String>>>,
}

impl PageAnchors {
    fn new() -> Self {
        PageAnchors {
            cache: HashMap::new(),
        }
    }

    fn anchors(&mut self, page: &PathBuf) -> Option<&HashSet<String>> {
        self.cache
            .entry(page.clone())
            .or_insert_with(|| {
                fs::read_to_string(page).ok().map(|html| {
                    ANCHOR_RE
                        .captures_iter(&html)
                        .map(|cap| cap[1].to_string())
                        .collect()
                })
            })
            .as_ref()
    }
}

/// Run every check over the docs tree and collect the findings
pub fn check_docs(config: &Config, verbose: bool) -> Result<CheckReport, String> {
    let chunks = chunk_files(config)?;
    if chunks.is_empty() {
        return Err(format!(
            "No searchData chunks (*.js) in {}",
            config.search_dir().display()
        ));
    }

    let mut report = CheckReport::default();
    let mut seen_keys: HashMap<String, String> = HashMap::new();
    let mut pages = PageAnchors::new();

    for (name, path) in &chunks {
        report.chunks_checked += 1;

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                report.error(name, "", format!("failed to read chunk: {}", e));
                continue;
            }
        };

        let entries = match parse_chunk(&text) {
            Ok(entries) => entries,
            Err(e) => {
                report.error(name, "", format!("parse failure: {}", e));
                continue;
            }
        };

        if verbose {
            eprintln!("  🔎 {} ({} entries)", name, entries.len());
        }

        // (c) deterministic round-trip
        if emit_chunk(&entries) != text {
            report.error(
                name,
                "",
                "re-emission does not reproduce the file byte-for-byte".to_string(),
            );
        }

        for entry in &entries {
            report.entries_checked += 1;

            // (a) key uniqueness across the whole table
            if let Some(other) = seen_keys.get(&entry.key) {
                report.error(
                    name,
                    &entry.key,
                    format!("duplicate key (already defined in {})", other),
                );
            } else {
                seen_keys.insert(entry.key.clone(), name.clone());
            }

            // key/label agreement
            let expected = obfuscate(&entry.label);
            if expected != entry.key {
                let hint = match deobfuscate(&entry.key) {
                    Some(decoded) => format!("key decodes to '{}'", decoded),
                    None => "key has malformed hex escapes".to_string(),
                };
                report.error(
                    name,
                    &entry.key,
                    format!(
                        "key does not match label '{}' (expected '{}'; {})",
                        entry.label, expected, hint
                    ),
                );
            }

            if entry.targets.is_empty() {
                report.warning(name, &entry.key, "entry has no targets".to_string());
            }

            // (b) anchor resolution
            for target in &entry.targets {
                if target.fragment.is_empty() {
                    report.error(
                        name,
                        &entry.key,
                        format!("target '{}' has no #fragment", target.url),
                    );
                    continue;
                }

                let page = config.resolve_page(&target.url);
                if !page.exists() {
                    report.error(
                        name,
                        &entry.key,
                        format!("page not found: {}", target.url),
                    );
                    continue;
                }

                match pages.anchors(&page) {
                    Some(anchors) => {
                        if !anchors.contains(&target.fragment) {
                            report.error(
                                name,
                                &entry.key,
                                format!(
                                    "dangling anchor: {}#{}",
                                    target.url, target.fragment
                                ),
                            );
                        }
                    }
                    None => {
                        report.warning(
                            name,
                            &entry.key,
                            format!("page could not be read: {}", target.url),
                        );
                    }
                }
            }
        }
    }

    report.pages_scanned = pages.cache.len();
    Ok(report)
}

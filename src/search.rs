//! Search and lookup over a loaded documentation search index

use crate::{
    index::{SearchEntry, SearchIndex, Target},
    syntax::highlight_cpp_code,
};
use colored::*;
use std::io::{self, Write};

/// Search labels the way the documentation widget does and display the hits
pub fn search_symbols(index: &SearchIndex, query: &str, limit: usize, verbose: bool) -> Result<(), String> {
    let hits = index.search(query);

    if hits.is_empty() {
        return Err(format!("No symbols matching '{}'", query));
    }

    println!("\n{} Found {} result(s):\n", "🔍".cyan(), hits.len());
    for entry in hits.iter().take(limit) {
        display_entry(entry, verbose);
    }
    if hits.len() > limit {
        println!("  ... and {} more", hits.len() - limit);
    }

    Ok(())
}

/// Exact lookup by label (or obfuscated key), with suggestions on a miss
pub fn lookup_symbol(index: &SearchIndex, name: &str, verbose: bool) -> Result<(), String> {
    let mut matches = index.get_by_label(name);
    if matches.is_empty() {
        if let Some(entry) = index.get(name) {
            matches.push(entry);
        }
    }

    if !matches.is_empty() {
        println!();
        for entry in matches {
            display_entry(entry, true);
        }
        return Ok(());
    }

    let suggestions = get_symbol_suggestions(index, name);
    if suggestions.is_empty() {
        Err(format!("Symbol '{}' not found in index", name))
    } else {
        println!(
            "{} No exact match found. Did you mean one of these?\n",
            "ℹ️".blue()
        );
        for entry in suggestions.iter().take(10) {
            println!("  {} {}", "•".cyan(), entry.label.green());
            if verbose {
                println!("    Overloads: {}", entry.targets.len());
            }
        }
        if suggestions.len() > 10 {
            println!("\n  ... and {} more", suggestions.len() - 10);
        }
        Ok(())
    }
}

/// Interactive search mode
pub fn interactive_search(index: &SearchIndex, limit: usize) -> Result<(), String> {
    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!("{}", "║   Documentation Index Search             ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();
    print_repl_help();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", "doxfind>".blue().bold());
        stdout.flush().map_err(|e| e.to_string())?;

        let mut input = String::new();
        let read = stdin.read_line(&mut input).map_err(|e| e.to_string())?;
        if read == 0 {
            break; // EOF
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts[0] {
            "quit" | "exit" | "q" => {
                println!("Goodbye! 👋");
                break;
            }
            "find" => {
                if parts.len() < 2 {
                    println!("{} Usage: find <query>", "⚠️".yellow());
                    continue;
                }
                let query = parts[1..].join(" ");
                if let Err(e) = search_symbols(index, &query, limit, false) {
                    println!("{} {}", "ℹ️".blue(), e);
                }
            }
            "sym" => {
                if parts.len() < 2 {
                    println!("{} Usage: sym <symbol>", "⚠️".yellow());
                    continue;
                }
                let _ = lookup_symbol(index, parts[1], true);
            }
            "owner" => {
                if parts.len() < 2 {
                    println!("{} Usage: owner <class>", "⚠️".yellow());
                    continue;
                }
                let entries = index.entries_for_owner(parts[1]);
                if entries.is_empty() {
                    println!("{} Owner '{}' not found", "❌".red(), parts[1]);
                } else {
                    println!(
                        "\n{} {} symbol(s) in {}:\n",
                        "📚".cyan(),
                        entries.len(),
                        parts[1].green().bold()
                    );
                    for entry in entries {
                        display_entry(entry, false);
                    }
                }
            }
            "help" | "?" => print_repl_help(),
            _ => {
                // Default to a search
                if let Err(e) = search_symbols(index, input, limit, false) {
                    println!("{} {}", "ℹ️".blue(), e);
                }
            }
        }
        println!();
    }

    Ok(())
}

fn print_repl_help() {
    println!("Commands:");
    println!("  {} <query>   - Search symbol labels", "find".green());
    println!("  {} <symbol>  - Exact symbol lookup", "sym".green());
    println!("  {} <class>   - List symbols of an owning class", "owner".green());
    println!("  {}           - Exit", "quit".green());
    println!();
}

/// Display one entry with its overload targets
pub fn display_entry(entry: &SearchEntry, verbose: bool) {
    let overload_count = entry.targets.len();
    let overload_text = if overload_count > 1 {
        format!(" ({} overloads)", overload_count)
    } else {
        String::new()
    };

    println!(
        "  {} {}{}",
        "▸".cyan(),
        entry.label.yellow().bold(),
        overload_text.dimmed()
    );

    for (idx, target) in entry.targets.iter().enumerate() {
        let is_last = idx == entry.targets.len() - 1;
        let prefix = if overload_count > 1 {
            if is_last { "  └─" } else { "  ├─" }
        } else {
            "    "
        };

        println!("{} {}", prefix.cyan(), format_target(target));

        if verbose {
            let continuation = if overload_count > 1 && !is_last {
                "  │  "
            } else {
                "     "
            };
            println!(
                "{}{}",
                continuation.cyan(),
                format!("{}#{}", target.url, target.fragment).dimmed()
            );
        }
    }
    println!();
}

/// One line per target: owning class, then the highlighted signature
fn format_target(target: &Target) -> String {
    if target.description.is_empty() {
        target.owner.green().to_string()
    } else {
        format!(
            "{} {}",
            target.owner.green(),
            highlight_cpp_code(&target.description)
        )
    }
}

/// Suggestions for a symbol name: substring hits first, then labels within
/// Levenshtein distance 2
pub fn get_symbol_suggestions<'a>(index: &'a SearchIndex, name: &str) -> Vec<&'a SearchEntry> {
    let mut suggestions = index.search(name);

    if suggestions.is_empty() {
        let name_lower = name.to_lowercase();
        let mut scored: Vec<(usize, &SearchEntry)> = index
            .entries
            .iter()
            .map(|entry| (edit_distance(&name_lower, &entry.label.to_lowercase()), entry))
            .filter(|(dist, _)| *dist <= 2)
            .collect();

        scored.sort_by_key(|(dist, _)| *dist);
        suggestions = scored.into_iter().map(|(_, entry)| entry).take(5).collect();
    }

    suggestions
}

/// Calculate simple edit distance between two strings (Levenshtein distance)
fn edit_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(matrix[i - 1][j] + 1, matrix[i][j - 1] + 1),
                matrix[i - 1][j - 1] + cost,
            );
        }
    }

    matrix[len1][len2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{SearchEntry, SearchIndex, Target};

    fn sample_index() -> SearchIndex {
        let target = |owner: &str| Target {
            url: "classFoo.html".to_string(),
            fragment: "a1".to_string(),
            owner: owner.to_string(),
            description: String::new(),
        };

        SearchIndex::build(vec![
            SearchEntry {
                key: "begin".to_string(),
                label: "begin".to_string(),
                targets: vec![target("estl::vector::Vector")],
            },
            SearchEntry {
                key: "cbegin".to_string(),
                label: "cbegin".to_string(),
                targets: vec![target("estl::vector::Vector")],
            },
            SearchEntry {
                key: "resize".to_string(),
                label: "resize".to_string(),
                targets: vec![target("estl::vector::Vector")],
            },
        ])
    }

    #[test]
    fn test_suggestions_prefer_substring_hits() {
        let index = sample_index();
        let suggestions = get_symbol_suggestions(&index, "begin");
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].label, "begin");
        assert_eq!(suggestions[1].label, "cbegin");
    }

    #[test]
    fn test_suggestions_fall_back_to_edit_distance() {
        let index = sample_index();
        // "resiz" matches "resize" as a prefix, so misspell further
        let suggestions = get_symbol_suggestions(&index, "resze");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "resize");
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("size", "size"), 0);
        assert_eq!(edit_distance("size", "resize"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
    }
}

use colored::*;

use crate::index::SearchIndex;

/// Render owner -> symbol -> overload lines for the whole index, or for one
/// owning class when `owner` is given
pub fn show_tree(index: &SearchIndex, owner: Option<&str>, verbose: bool) -> Result<(), String> {
    let owners: Vec<&str> = match owner {
        Some(name) => {
            if !index.owners.contains_key(name) {
                return Err(format!("Owner '{}' not found in index", name));
            }
            vec![name]
        }
        None => index.owner_names(),
    };

    println!("{} Symbol Tree:\n", "📊".cyan());

    for owner_name in owners {
        println!("{} {}", "📦".cyan(), owner_name.bold().green());

        let entries = index.entries_for_owner(owner_name);
        for (idx, entry) in entries.iter().enumerate() {
            let is_last = idx == entries.len() - 1;
            let branch = if is_last { "└─" } else { "├─" };

            // Only the targets owned by this class count here
            let targets: Vec<_> = entry
                .targets
                .iter()
                .filter(|t| t.owner == owner_name)
                .collect();

            println!(
                "  {} {} {}",
                branch.blue(),
                entry.label.green(),
                format!("({} overload(s))", targets.len()).dimmed()
            );

            if verbose {
                let stem = if is_last { "     " } else { "  │  " };
                for target in targets {
                    println!(
                        "{}{}",
                        stem.blue(),
                        format!("{}#{}", target.url, target.fragment).dimmed()
                    );
                }
            }
        }
        println!();
    }

    Ok(())
}

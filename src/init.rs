use colored::*;
use std::{fs, path::PathBuf};

pub fn init_config(force: bool) -> Result<(), String> {
    let config_path = PathBuf::from("doxfind.toml");

    if config_path.exists() && !force {
        return Err("doxfind.toml already exists. Use --force to overwrite.".to_string());
    }

    let template = r#"# doxfind Configuration File

# Root of the generated HTML documentation
# (the directory that contains index.html and the class pages)
docs_dir = "./html"

# Directory holding the searchData chunk files
# Defaults to "<docs_dir>/search" when omitted
# search_dir = "./html/search"

# Location of the parsed-chunk cache file
cache_file = "./doxfind-cache.json"

# Maximum number of results shown per search
limit = 20
"#;

    fs::write(&config_path, template)
        .map_err(|e| format!("Failed to create doxfind.toml: {}", e))?;

    println!("{} Created doxfind.toml", "✅".green());
    println!("\n{}", "Configuration file created with defaults:".cyan());
    println!("  {} docs_dir = \"./html\"", "•".blue());
    println!("  {} cache_file = \"./doxfind-cache.json\"", "•".blue());
    println!("  {} limit = 20", "•".blue());
    println!(
        "\n{}",
        "Edit doxfind.toml to point at your documentation tree.".cyan()
    );

    Ok(())
}

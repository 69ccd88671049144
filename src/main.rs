use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod cache;
mod check;
mod clean;
mod config;
mod emit;
mod index;
mod init;
mod keys;
mod parse;
mod report;
mod search;
mod syntax;
mod tree;

use check::check_docs;
use clean::clean;
use config::Config;
use index::{LoadContext, load_index};
use init::init_config;
use report::format_report;
use search::{interactive_search, lookup_symbol, search_symbols};
use tree::show_tree;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "doxfind")]
#[command(about = "Search and lint Doxygen documentation search indexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reparse every chunk (ignore cache)
    #[arg(short, long, global = true)]
    force: bool,

    /// Documentation root (overrides doxfind.toml)
    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search symbol labels the way the docs widget does
    Search {
        /// Query matched against symbol labels (prefix first, then substring)
        query: String,
    },
    /// Exact symbol lookup with suggestions on a miss
    Lookup {
        /// Symbol label (e.g. "operator*") or obfuscated key (e.g. "operator_2a")
        symbol: String,
    },
    /// Show symbols grouped by owning class
    Owners {
        /// Restrict to one owning class (e.g. "estl::matrix::Matrix")
        owner: Option<String>,
    },
    /// Validate the index against the documentation tree
    Check,
    /// Interactive search session
    Interactive,
    /// Initialize a new doxfind.toml configuration file
    Init {
        /// Overwrite existing doxfind.toml if present
        #[arg(long)]
        force: bool,
    },
    /// Remove the parsed-chunk cache
    Clean,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let cli = Cli::parse();

    let mut config = Config::load();

    // CLI flag overrides config file
    if let Some(docs_dir) = cli.docs_dir {
        config.docs_dir = docs_dir;
    }

    let ctx = LoadContext {
        config: config.clone(),
        verbose: cli.verbose,
        force: cli.force,
    };

    let result = match cli.command {
        Commands::Search { query } => load_index(&ctx)
            .and_then(|index| search_symbols(&index, &query, config.limit, cli.verbose)),
        Commands::Lookup { symbol } => {
            load_index(&ctx).and_then(|index| lookup_symbol(&index, &symbol, cli.verbose))
        }
        Commands::Owners { owner } => {
            load_index(&ctx).and_then(|index| show_tree(&index, owner.as_deref(), cli.verbose))
        }
        Commands::Check => check_docs(&config, cli.verbose).and_then(|report| {
            print!("{}", format_report(&report));
            if report.has_errors() {
                Err(format!("{} error(s) in index", report.error_count()))
            } else {
                Ok(())
            }
        }),
        Commands::Interactive => {
            load_index(&ctx).and_then(|index| interactive_search(&index, config.limit))
        }
        Commands::Init { force } => init_config(force),
        Commands::Clean => clean(&config),
    };

    if let Err(e) = result {
        eprintln!("\n{} {}", "❌".red(), e.red());
        std::process::exit(1);
    }
}

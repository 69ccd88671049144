//! Search-index model and loading
//!
//! This module owns the in-memory form of a Doxygen search index: the entry
//! and target records, the lookup maps built over them, and the cache-aware
//! loader that merges every `search/*.js` chunk of a docs tree into one
//! `SearchIndex`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use doxfind::index::{LoadContext, load_index};
//!
//! let index = load_index(&ctx)?;
//!
//! // Exact lookup by obfuscated key
//! if let Some(entry) = index.get("operator_2a") {
//!     println!("{} has {} overload(s)", entry.label, entry.targets.len());
//! }
//!
//! // Widget-style matching
//! for entry in index.search("operator") {
//!     println!("{}", entry.label);
//! }
//! ```

mod load;
mod types;

pub use load::{LoadContext, chunk_files, load_index};
pub use types::{SearchEntry, SearchIndex, Target};

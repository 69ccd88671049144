//! doxfind
//!
//! Search and lint toolkit for Doxygen-style documentation search indexes.

pub mod cache;
pub mod config;
pub mod emit;
pub mod index;
pub mod keys;
pub mod parse;

// Re-export commonly used types
pub use index::{SearchEntry, SearchIndex, Target};

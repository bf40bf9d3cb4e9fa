//! Project file parsing and validation
//!
//! An optional mkgo.yml tunes the recipe (app name, toolchain, test and
//! build flags). Without one every task runs on built-in defaults.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;

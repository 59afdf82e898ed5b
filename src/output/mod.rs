//! Output module for persisting harvest results
//!
//! This module handles:
//! - Writing categories and products as JSON files
//! - Recording harvest statistics and skipped-row diagnostics

mod json_writer;
pub mod stats;
mod traits;

pub use json_writer::{category_file_name, JsonCatalogWriter, ALL_PRODUCTS_FILE, CATEGORIES_FILE};
pub use stats::{print_statistics, HarvestStats};
pub use traits::{CatalogSink, OutputError, OutputResult};

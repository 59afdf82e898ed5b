//! Output sink trait and errors
//!
//! This module defines the interface the coordinator writes harvest results
//! through.

use crate::catalog::{Category, Product};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for harvested records
///
/// Every method writes one complete file and returns its path. A failure
/// only affects the file being written.
pub trait CatalogSink {
    /// Writes the category index
    fn write_categories(&self, categories: &[Category]) -> OutputResult<PathBuf>;

    /// Writes the products of a single category
    ///
    /// # Arguments
    ///
    /// * `category` - The category the products were listed under
    /// * `products` - Products in page then row order
    fn write_category_products(
        &self,
        category: &Category,
        products: &[Product],
    ) -> OutputResult<PathBuf>;

    /// Writes the combined product list of the whole run
    fn write_all_products(&self, products: &[Product]) -> OutputResult<PathBuf>;
}

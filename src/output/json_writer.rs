//! JSON catalog writer
//!
//! Writes pretty-printed JSON arrays into a single output directory:
//! `categories.json`, one `<stem>_products.json` per category and
//! `all_products.json`.

use crate::catalog::{Category, Product};
use crate::output::traits::{CatalogSink, OutputError, OutputResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the category index
pub const CATEGORIES_FILE: &str = "categories.json";

/// File name of the combined product list
pub const ALL_PRODUCTS_FILE: &str = "all_products.json";

/// Output file name for a category's products
///
/// ```
/// use catalog_harvest::output::category_file_name;
///
/// assert_eq!(category_file_name("TEST & MEASUREMENT"), "TEST_and_MEASUREMENT_products.json");
/// ```
pub fn category_file_name(category_name: &str) -> String {
    format!(
        "{}_products.json",
        category_name.replace(' ', "_").replace('&', "and")
    )
}

/// Writes harvest results as JSON files
#[derive(Debug, Clone)]
pub struct JsonCatalogWriter {
    directory: PathBuf,
}

impl JsonCatalogWriter {
    /// Creates a writer, creating the output directory if absent
    pub fn new(directory: impl AsRef<Path>) -> OutputResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    /// The directory files are written to
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        records: &T,
    ) -> OutputResult<PathBuf> {
        let path = self.directory.join(file_name);
        let json = serde_json::to_string_pretty(records)?;

        fs::write(&path, json).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

impl CatalogSink for JsonCatalogWriter {
    fn write_categories(&self, categories: &[Category]) -> OutputResult<PathBuf> {
        self.write_json(CATEGORIES_FILE, categories)
    }

    fn write_category_products(
        &self,
        category: &Category,
        products: &[Product],
    ) -> OutputResult<PathBuf> {
        self.write_json(&category_file_name(&category.name), products)
    }

    fn write_all_products(&self, products: &[Product]) -> OutputResult<PathBuf> {
        self.write_json(ALL_PRODUCTS_FILE, products)
    }
}

//! Catalog data model and taxonomy
//!
//! - `Category` and `Product` records as they are written to disk
//! - The fixed category table and the live categories-page probe

pub mod category;
mod model;

pub use category::{extract_categories, known_categories, CategoryProbe, CATEGORY_NAMES};
pub use model::{Category, Product};

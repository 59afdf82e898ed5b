//! Crawler module for listing retrieval and product extraction
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with timeouts and error classification
//! - Request pacing
//! - Listing table parsing
//! - Pagination per category
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod listing;
mod parser;
mod throttle;

pub use coordinator::{run_harvest, Coordinator};
pub use fetcher::{build_http_client, Fetcher};
pub use listing::scrape_category;
pub use parser::{
    parse_listing, parse_row, select_product_rows, CellRule, FieldMapping, ProductField,
    RowDiagnostic, RowSkip, ALTERNATE_ROW_CLASS, MIN_ROW_CELLS, PRIMARY_ROW_CLASS,
    PRODUCT_FIELDS,
};
pub use throttle::{sample_delay, Throttle};

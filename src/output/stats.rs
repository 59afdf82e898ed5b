//! Harvest statistics
//!
//! Counters collected while a run progresses, plus the structured record of
//! every listing row that was skipped.

use crate::crawler::RowDiagnostic;
use std::collections::BTreeMap;

/// Counters for one harvest run
#[derive(Debug, Clone, Default)]
pub struct HarvestStats {
    /// Categories processed
    pub categories: usize,

    /// Listing pages fetched successfully
    pub pages_fetched: usize,

    /// Listing pages whose fetch failed
    pub pages_failed: usize,

    /// Products extracted across all categories
    pub products: usize,

    /// Output files written
    pub files_written: usize,

    /// Output files that could not be written
    pub write_failures: usize,

    /// Every skipped row, in the order it was encountered
    pub skipped_rows: Vec<RowDiagnostic>,
}

impl HarvestStats {
    /// Creates an empty set of counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped row
    pub fn record_skip(&mut self, diagnostic: RowDiagnostic) {
        self.skipped_rows.push(diagnostic);
    }

    /// Number of rows that produced no product
    pub fn rows_skipped(&self) -> usize {
        self.skipped_rows.len()
    }

    /// Skipped rows per category
    pub fn skips_by_category(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for diagnostic in &self.skipped_rows {
            *counts.entry(diagnostic.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether anything went wrong during the run
    pub fn has_failures(&self) -> bool {
        self.pages_failed > 0 || self.write_failures > 0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStats) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Categories: {}", stats.categories);
    println!("  Products extracted: {}", stats.products);
    println!(
        "  Listing pages: {} fetched, {} failed",
        stats.pages_fetched, stats.pages_failed
    );
    println!(
        "  Output files: {} written, {} failed",
        stats.files_written, stats.write_failures
    );
    println!();

    if !stats.skipped_rows.is_empty() {
        println!("Skipped Rows ({}):", stats.rows_skipped());
        for (category, count) in stats.skips_by_category() {
            println!("  {}: {}", category, count);
        }
        println!();
    }
}

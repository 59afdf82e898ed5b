//! Paginated listing walker
//!
//! Walks the listing pages of one category until a page has no product rows
//! or the page limit is reached.

use crate::catalog::{Category, Product};
use crate::config::ListingConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{parse_listing, RowDiagnostic};
use crate::output::HarvestStats;
use url::Url;

/// Extracts the products listed under a category
///
/// Products come back in page order, then row order. Skipped rows are
/// recorded in `stats`. A failed page fetch ends pagination for the category
/// but keeps what earlier pages produced.
///
/// # Arguments
///
/// * `fetcher` - Fetcher every listing request goes through
/// * `category` - The category to walk
/// * `base_url` - Base that product links are resolved against
/// * `listing` - Pagination limits
/// * `stats` - Run counters to update
pub async fn scrape_category(
    fetcher: &mut Fetcher,
    category: &Category,
    base_url: &Url,
    listing: &ListingConfig,
    stats: &mut HarvestStats,
) -> Vec<Product> {
    tracing::info!("Extracting products from category: {}", category.name);
    let mut products = Vec::new();

    for page in 1..=listing.max_pages {
        let url = category.page_url(page);

        let outcomes = match fetcher.fetch_document(&url).await {
            Ok(document) => parse_listing(&document, &category.name, base_url),
            Err(e) => {
                tracing::warn!(
                    category = %category.name,
                    page,
                    "Listing page fetch failed, skipping rest of category: {}",
                    e
                );
                stats.pages_failed += 1;
                break;
            }
        };
        stats.pages_fetched += 1;

        if outcomes.is_empty() {
            tracing::info!(
                "No products found for category {} on page {}",
                category.name,
                page
            );
            break;
        }

        for (row_index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(product) => {
                    products.push(product);
                    fetcher.throttle().row_pause().await;
                }
                Err(reason) => {
                    tracing::warn!(
                        category = %category.name,
                        page,
                        row_index,
                        "Skipping listing row: {}",
                        reason
                    );
                    stats.record_skip(RowDiagnostic {
                        category: category.name.clone(),
                        page,
                        row_index,
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            "Extracted {} products from {} (page {})",
            products.len(),
            category.name,
            page
        );

        if page < listing.max_pages {
            fetcher.throttle().page_pause().await;
        }
    }

    products
}

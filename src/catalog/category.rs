//! Category extraction
//!
//! The categories page renders every section as concatenated text inside one
//! table row, so the taxonomy is kept as a constant table. The live page is
//! only probed to detect drift.

use crate::catalog::Category;
use crate::config::SiteConfig;
use crate::crawler::Fetcher;
use scraper::{Html, Selector};

/// Known top-level catalog sections, in catalog order
pub const CATEGORY_NAMES: [&str; 19] = [
    "CHEMICALS",
    "COMPONENTS",
    "COMPUTER EQUIPMENT",
    "CONNECTORS",
    "CONSUMABLES",
    "CONSUMER GOODS",
    "ELECTRICAL",
    "ELECTROMECHANICAL",
    "ELECTRONIC KITS",
    "HARDWARE",
    "IOT",
    "LITERATURE",
    "Miscellaneous",
    "POWER",
    "RFID",
    "SECURITY EQUIPMENT",
    "TEST & MEASUREMENT",
    "TOOLS",
    "WIRE & CABLE",
];

/// What the live categories page looked like compared to the constant table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProbe {
    /// Concatenated text of the categories row
    pub row_text: String,

    /// Known names that do not appear in the row text
    pub missing: Vec<&'static str>,
}

impl CategoryProbe {
    /// Whether every known category was found on the page
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Builds the fixed category list against a listing endpoint
pub fn known_categories(listing_endpoint: &str) -> Vec<Category> {
    CATEGORY_NAMES
        .iter()
        .map(|name| Category::new(name, listing_endpoint))
        .collect()
}

/// Inspects a parsed categories page
///
/// The categories row is the first `<tr>` carrying no `class`, `id` or
/// `style` attribute. Returns `None` if no such row exists.
pub fn probe_categories_page(document: &Html) -> Option<CategoryProbe> {
    let selector = Selector::parse("tr:not([class]):not([id]):not([style])").ok()?;
    let row = document.select(&selector).next()?;

    let row_text: String = row
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let missing = CATEGORY_NAMES
        .iter()
        .copied()
        .filter(|name| !row_text.contains(&name.replace(' ', "")) && !row_text.contains(name))
        .collect();

    Some(CategoryProbe { row_text, missing })
}

/// Produces the categories to harvest
///
/// The categories page is fetched as a sanity probe; whatever it shows, the
/// constant table is returned.
pub async fn extract_categories(fetcher: &mut Fetcher, site: &SiteConfig) -> Vec<Category> {
    tracing::info!("Extracting categories...");

    let categories_url = site.categories_url();
    match fetcher.fetch_document(&categories_url).await {
        Ok(document) => match probe_categories_page(&document) {
            Some(probe) if probe.is_consistent() => {
                tracing::debug!("Categories page lists every known category");
            }
            Some(probe) => {
                tracing::warn!(
                    "Categories page no longer lists {} known categories: {:?}",
                    probe.missing.len(),
                    probe.missing
                );
            }
            None => {
                tracing::warn!("Could not find categories row on {}", categories_url);
            }
        },
        Err(e) => {
            tracing::warn!("Categories probe failed: {}", e);
        }
    }

    known_categories(&site.listing_endpoint())
}

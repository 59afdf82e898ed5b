//! Harvest coordinator - main orchestration logic
//!
//! This module sequences a run:
//! - Extracting categories and writing the category index
//! - Walking every category's listing pages in order
//! - Writing each category's products as soon as it is done
//! - Writing the combined product list and reporting totals

use crate::catalog::{extract_categories, Product};
use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::scrape_category;
use crate::output::{CatalogSink, HarvestStats, JsonCatalogWriter, OutputResult};
use crate::HarvestError;
use std::path::PathBuf;
use std::time::Instant;
use url::Url;

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    sink: Box<dyn CatalogSink>,
    base_url: Url,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    /// * `sink` - Where categories and products are written
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client or base URL could not be set up
    pub fn new(config: Config, sink: Box<dyn CatalogSink>) -> Result<Self, HarvestError> {
        let fetcher = Fetcher::new(&config)?;
        Self::with_fetcher(config, fetcher, sink)
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(
        config: Config,
        fetcher: Fetcher,
        sink: Box<dyn CatalogSink>,
    ) -> Result<Self, HarvestError> {
        let base_url = Url::parse(&config.site.base_url)?;
        Ok(Self {
            config,
            fetcher,
            sink,
            base_url,
        })
    }

    /// Number of requests sent so far
    pub fn fetch_count(&self) -> u64 {
        self.fetcher.fetch_count()
    }

    /// Runs the harvest
    ///
    /// Nothing short of a setup failure stops a run: fetch failures skip a
    /// category's remaining pages and write failures lose only the affected
    /// file.
    pub async fn run(&mut self) -> Result<HarvestStats, HarvestError> {
        let start_time = Instant::now();
        let mut stats = HarvestStats::new();

        let categories = extract_categories(&mut self.fetcher, &self.config.site).await;
        if categories.is_empty() {
            tracing::info!("No categories to harvest");
            return Ok(stats);
        }

        record_write(self.sink.write_categories(&categories), &mut stats);
        stats.categories = categories.len();
        tracing::info!("Extracted {} categories", categories.len());

        let mut all_products: Vec<Product> = Vec::new();

        for (index, category) in categories.iter().enumerate() {
            let products = scrape_category(
                &mut self.fetcher,
                category,
                &self.base_url,
                &self.config.listing,
                &mut stats,
            )
            .await;

            record_write(
                self.sink.write_category_products(category, &products),
                &mut stats,
            );

            stats.products += products.len();
            all_products.extend(products);

            if index + 1 < categories.len() {
                self.fetcher.throttle().category_pause().await;
            }
        }

        record_write(self.sink.write_all_products(&all_products), &mut stats);

        tracing::info!(
            "Extracted a total of {} products in {:?}",
            all_products.len(),
            start_time.elapsed()
        );

        Ok(stats)
    }
}

fn record_write(result: OutputResult<PathBuf>, stats: &mut HarvestStats) {
    match result {
        Ok(path) => {
            stats.files_written += 1;
            tracing::debug!("Saved {}", path.display());
        }
        Err(e) => {
            stats.write_failures += 1;
            tracing::error!("{}", e);
        }
    }
}

/// Runs a complete harvest, writing JSON into the configured directory
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::Config;
/// use catalog_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_harvest(Config::default()).await?;
/// println!("{} products", stats.products);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<HarvestStats, HarvestError> {
    let writer = JsonCatalogWriter::new(&config.output.directory)?;
    let mut coordinator = Coordinator::new(config, Box::new(writer))?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::config::ThrottleConfig;
    use crate::output::OutputError;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Keeps everything in memory; optionally refuses category files
    #[derive(Default)]
    struct MemorySink {
        categories: RefCell<Vec<Category>>,
        per_category: RefCell<Vec<(String, Vec<Product>)>>,
        all: RefCell<Vec<Product>>,
        fail_category_writes: bool,
    }

    struct SharedSink(Rc<MemorySink>);

    impl CatalogSink for SharedSink {
        fn write_categories(&self, categories: &[Category]) -> OutputResult<PathBuf> {
            *self.0.categories.borrow_mut() = categories.to_vec();
            Ok(PathBuf::from("categories.json"))
        }

        fn write_category_products(
            &self,
            category: &Category,
            products: &[Product],
        ) -> OutputResult<PathBuf> {
            if self.0.fail_category_writes {
                return Err(OutputError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.0
                .per_category
                .borrow_mut()
                .push((category.name.clone(), products.to_vec()));
            Ok(PathBuf::from(&category.name))
        }

        fn write_all_products(&self, products: &[Product]) -> OutputResult<PathBuf> {
            *self.0.all.borrow_mut() = products.to_vec();
            Ok(PathBuf::from("all_products.json"))
        }
    }

    fn row(code: &str) -> String {
        format!(
            "<tr class=\"GridViewRow\"><td></td><td><a href=\"/p/{0}\">{0}</a></td>\
             <td><span>PN</span></td><td><span>M</span></td><td><span>D</span></td></tr>",
            code
        )
    }

    fn page(rows: &[&str]) -> String {
        let body: String = rows.iter().map(|code| row(code)).collect();
        format!("<html><body><table>{}</table></body></html>", body)
    }

    async fn mock_category(server: &MockServer, query: &str, codes: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/Stock.aspx"))
            .and(query_param("Query", query))
            .respond_with(ResponseTemplate::new(200).set_body_string(page(codes)))
            .mount(server)
            .await;
    }

    fn test_config(base_url: String) -> Config {
        let mut config = Config::default();
        config.site.base_url = base_url;
        config.listing.max_pages = 1;
        config.throttle = ThrottleConfig::disabled();
        config
    }

    #[tokio::test]
    async fn test_run_concatenates_categories_in_order() {
        let mock_server = MockServer::start().await;
        mock_category(&mock_server, "CHEMICALS", &["C1", "C2"]).await;
        mock_category(&mock_server, "IOT", &["I1"]).await;
        // Every other category answers with an empty listing
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page(&[])))
            .mount(&mock_server)
            .await;

        let sink = Rc::new(MemorySink::default());
        let mut coordinator =
            Coordinator::new(test_config(mock_server.uri()), Box::new(SharedSink(sink.clone())))
                .unwrap();

        let stats = coordinator.run().await.unwrap();

        assert_eq!(stats.categories, 19);
        assert_eq!(stats.products, 3);
        assert_eq!(stats.files_written, 21);
        assert_eq!(sink.categories.borrow().len(), 19);

        let concatenated: Vec<Product> = sink
            .per_category
            .borrow()
            .iter()
            .flat_map(|(_, products)| products.clone())
            .collect();
        let all = sink.all.borrow();
        assert_eq!(*all, concatenated);
        let codes: Vec<&str> = all.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["C1", "C2", "I1"]);
        assert!(all.iter().all(|p| p.category == "CHEMICALS" || p.category == "IOT"));

        // One probe plus one listing page per category
        assert_eq!(coordinator.fetch_count(), 20);
    }

    #[tokio::test]
    async fn test_write_failures_do_not_stop_run() {
        let mock_server = MockServer::start().await;
        mock_category(&mock_server, "TOOLS", &["T1"]).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let sink = Rc::new(MemorySink {
            fail_category_writes: true,
            ..Default::default()
        });
        let mut coordinator =
            Coordinator::new(test_config(mock_server.uri()), Box::new(SharedSink(sink.clone())))
                .unwrap();

        let stats = coordinator.run().await.unwrap();

        assert_eq!(stats.write_failures, 19);
        assert_eq!(stats.files_written, 2);
        assert_eq!(stats.pages_failed, 18);
        assert_eq!(sink.all.borrow().len(), 1);
        assert_eq!(sink.all.borrow()[0].code, "T1");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = test_config("not a url".to_string());
        let sink = Rc::new(MemorySink::default());
        let result = Coordinator::new(config, Box::new(SharedSink(sink)));
        assert!(matches!(result, Err(HarvestError::UrlParse(_))));
    }
}

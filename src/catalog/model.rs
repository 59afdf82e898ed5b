use serde::{Deserialize, Serialize};

/// One top-level catalog section and the listing URL that enumerates it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub url: String,
}

impl Category {
    /// Builds a category, deriving its listing URL from the endpoint
    ///
    /// Spaces in the name become `+`; nothing else is encoded.
    ///
    /// ```
    /// use catalog_harvest::Category;
    ///
    /// let category = Category::new("COMPUTER EQUIPMENT", "https://example.com/Stock.aspx");
    /// assert_eq!(category.url, "https://example.com/Stock.aspx?Query=COMPUTER+EQUIPMENT");
    /// ```
    pub fn new(name: &str, listing_endpoint: &str) -> Self {
        Self {
            name: name.to_string(),
            url: format!("{}?Query={}", listing_endpoint, name.replace(' ', "+")),
        }
    }

    /// URL of the given 1-based listing page
    pub fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            self.url.clone()
        } else {
            format!("{}&Page={}", self.url, page)
        }
    }
}

/// A single catalog item extracted from a listing row
///
/// Field order is the serialized order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub part_number: String,
    pub manufacturer: String,
    pub description: String,
    pub price: String,
    pub url: String,
    /// Name of the category whose listing produced this product
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://mantech.co.za/Stock.aspx";

    #[test]
    fn test_single_word_url() {
        let category = Category::new("IOT", ENDPOINT);
        assert_eq!(category.url, "https://mantech.co.za/Stock.aspx?Query=IOT");
    }

    #[test]
    fn test_ampersand_is_not_encoded() {
        let category = Category::new("TEST & MEASUREMENT", ENDPOINT);
        assert_eq!(
            category.url,
            "https://mantech.co.za/Stock.aspx?Query=TEST+&+MEASUREMENT"
        );
    }

    #[test]
    fn test_page_urls() {
        let category = Category::new("WIRE & CABLE", ENDPOINT);
        assert_eq!(category.page_url(1), category.url);
        assert_eq!(
            category.page_url(3),
            "https://mantech.co.za/Stock.aspx?Query=WIRE+&+CABLE&Page=3"
        );
    }

    #[test]
    fn test_product_field_order() {
        let product = Product {
            code: "C1".to_string(),
            category: "IOT".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&product).unwrap();
        assert_eq!(
            json,
            r#"{"code":"C1","part_number":"","manufacturer":"","description":"","price":"","url":"","category":"IOT"}"#
        );
    }
}

//! Listing page parser
//!
//! Product rows are `<tr>` elements styled `GridViewRow`, or
//! `GridViewAlternatingRow` when a page has none of the former. Each row is
//! mapped to a `Product` through the `PRODUCT_FIELDS` table.

use crate::catalog::Product;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Row style marking a product row
pub const PRIMARY_ROW_CLASS: &str = "GridViewRow";

/// Row style used when no primary rows are present
pub const ALTERNATE_ROW_CLASS: &str = "GridViewAlternatingRow";

/// Rows with fewer cells than this are not product rows
pub const MIN_ROW_CELLS: usize = 5;

/// Product attributes filled from table cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    /// Link text gives the code, link target gives the product URL
    Code,
    PartNumber,
    Manufacturer,
    Description,
    Price,
}

/// How a cell's content is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRule {
    /// First `<a>` in the cell; the row is skipped without one
    Link,
    /// Text of the first nested `<span>`, or empty
    Label,
}

/// Where a product attribute lives in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub field: ProductField,
    /// Zero-based `<td>` index
    pub cell: usize,
    /// The field is left empty unless the row has at least this many cells
    pub min_cells: usize,
    pub rule: CellRule,
}

/// Listing row layout
pub const PRODUCT_FIELDS: [FieldMapping; 5] = [
    FieldMapping {
        field: ProductField::Code,
        cell: 1,
        min_cells: MIN_ROW_CELLS,
        rule: CellRule::Link,
    },
    FieldMapping {
        field: ProductField::PartNumber,
        cell: 2,
        min_cells: MIN_ROW_CELLS,
        rule: CellRule::Label,
    },
    FieldMapping {
        field: ProductField::Manufacturer,
        cell: 3,
        min_cells: MIN_ROW_CELLS,
        rule: CellRule::Label,
    },
    FieldMapping {
        field: ProductField::Description,
        cell: 4,
        min_cells: MIN_ROW_CELLS,
        rule: CellRule::Label,
    },
    FieldMapping {
        field: ProductField::Price,
        cell: 6,
        min_cells: 7,
        rule: CellRule::Label,
    },
];

/// Why a listing row produced no product
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowSkip {
    #[error("row has {found} cells, expected at least {}", MIN_ROW_CELLS)]
    TooFewCells { found: usize },

    #[error("no product link in cell {cell}")]
    MissingLink { cell: usize },

    #[error("product link in cell {cell} has no href")]
    MissingHref { cell: usize },

    #[error("cannot resolve product link '{href}'")]
    BadHref { href: String },
}

/// A skipped row, with enough context to find it again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    pub category: String,
    /// 1-based listing page
    pub page: u32,
    /// Zero-based index among the page's product rows
    pub row_index: usize,
    pub reason: RowSkip,
}

/// Selects the product rows of a listing page
pub fn select_product_rows(document: &Html) -> Vec<ElementRef<'_>> {
    for class in [PRIMARY_ROW_CLASS, ALTERNATE_ROW_CLASS] {
        let Ok(selector) = Selector::parse(&format!("tr.{}", class)) else {
            continue;
        };
        let rows: Vec<_> = document.select(&selector).collect();
        if !rows.is_empty() {
            return rows;
        }
    }
    Vec::new()
}

/// Parses every product row of a listing page
///
/// Returns one outcome per row, in document order. An empty vector means the
/// page had no product rows at all.
///
/// # Example
///
/// ```
/// use catalog_harvest::crawler::parse_listing;
/// use scraper::Html;
/// use url::Url;
///
/// let html = r#"<table><tr class="GridViewRow">
///     <td></td><td><a href="Info.aspx?Item=7">C7</a></td>
///     <td><span>PN</span></td><td><span>ACME</span></td><td><span>Widget</span></td>
/// </tr></table>"#;
/// let base = Url::parse("https://example.com").unwrap();
/// let rows = parse_listing(&Html::parse_document(html), "TOOLS", &base);
/// let product = rows[0].as_ref().unwrap();
/// assert_eq!(product.code, "C7");
/// assert_eq!(product.url, "https://example.com/Info.aspx?Item=7");
/// ```
pub fn parse_listing(
    document: &Html,
    category: &str,
    base_url: &Url,
) -> Vec<Result<Product, RowSkip>> {
    select_product_rows(document)
        .into_iter()
        .map(|row| parse_row(row, category, base_url))
        .collect()
}

/// Maps one table row to a product
pub fn parse_row(row: ElementRef<'_>, category: &str, base_url: &Url) -> Result<Product, RowSkip> {
    let cells = select_all(row, "td");

    if cells.len() < MIN_ROW_CELLS {
        return Err(RowSkip::TooFewCells { found: cells.len() });
    }

    let mut product = Product {
        category: category.to_string(),
        ..Default::default()
    };

    for mapping in PRODUCT_FIELDS.iter() {
        if cells.len() < mapping.min_cells {
            continue;
        }
        let cell = cells[mapping.cell];

        match mapping.rule {
            CellRule::Link => {
                let (text, url) = read_link(cell, mapping.cell, base_url)?;
                *field_mut(&mut product, mapping.field) = text;
                product.url = url;
            }
            CellRule::Label => {
                *field_mut(&mut product, mapping.field) = read_label(cell);
            }
        }
    }

    Ok(product)
}

fn field_mut(product: &mut Product, field: ProductField) -> &mut String {
    match field {
        ProductField::Code => &mut product.code,
        ProductField::PartNumber => &mut product.part_number,
        ProductField::Manufacturer => &mut product.manufacturer,
        ProductField::Description => &mut product.description,
        ProductField::Price => &mut product.price,
    }
}

fn read_link(
    cell: ElementRef<'_>,
    index: usize,
    base_url: &Url,
) -> Result<(String, String), RowSkip> {
    let link = select_first(cell, "a").ok_or(RowSkip::MissingLink { cell: index })?;

    let href = link
        .value()
        .attr("href")
        .ok_or(RowSkip::MissingHref { cell: index })?;

    let url = base_url.join(href.trim()).map_err(|_| RowSkip::BadHref {
        href: href.to_string(),
    })?;

    Ok((element_text(link), url.to_string()))
}

fn read_label(cell: ElementRef<'_>) -> String {
    select_first(cell, "span")
        .map(element_text)
        .unwrap_or_default()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn select_all<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    let matches: Vec<ElementRef<'a>> = element.select(&selector).collect();
    matches
}

fn select_first<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    select_all(element, css).into_iter().next()
}

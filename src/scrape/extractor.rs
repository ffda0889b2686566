//! Price extraction from fetched HTML
//!
//! A target either names its own CSS selector or relies on a fixed list of
//! default selectors that cover the usual ways shops mark up a price.

use crate::ExtractionError;
use scraper::{Html, Selector};

/// Selectors tried, in order, when a target has no selector of its own
pub const DEFAULT_SELECTORS: [&str; 4] = [".price", "#price", "[class*=\"price\"]", "[id*=\"price\"]"];

/// A parsed HTML page
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Returns the text of the first element matching `selector`, each text
    /// fragment trimmed before joining
    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.html
            .select(selector)
            .next()
            .map(|element| element.text().map(str::trim).collect::<String>())
    }
}

/// Extracts the price text from a document
///
/// With a selector, the first matching element is used. Without one, each of
/// [`DEFAULT_SELECTORS`] is tried in order and the first that matches wins.
/// The value is returned as rendered on the page (currency symbols and any
/// surrounding words included). Every text fragment of the element is trimmed
/// before the fragments are joined, so markup indentation never leaks into
/// the value.
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `selector` - Optional CSS selector for the price element
///
/// # Returns
///
/// * `Ok(String)` - The trimmed text of the matched element
/// * `Err(ExtractionError)` - No element matched, or the selector is not valid CSS
///
/// # Example
///
/// ```
/// use price_ripple::scrape::{extract, Document};
///
/// let doc = Document::parse(r#"<span class="price"> $12.99 </span>"#);
/// assert_eq!(extract(&doc, Some(".price")).unwrap(), "$12.99");
/// ```
pub fn extract(document: &Document, selector: Option<&str>) -> Result<String, ExtractionError> {
    match selector {
        Some(raw) => {
            let parsed = Selector::parse(raw).map_err(|e| ExtractionError::InvalidSelector {
                selector: raw.to_string(),
                reason: format!("{:?}", e),
            })?;

            document
                .first_text(&parsed)
                .ok_or_else(|| ExtractionError::NotFound(raw.to_string()))
        }
        None => DEFAULT_SELECTORS
            .iter()
            .filter_map(|raw| Selector::parse(raw).ok())
            .find_map(|parsed| document.first_text(&parsed))
            .ok_or(ExtractionError::NoDefaultMatch),
    }
}

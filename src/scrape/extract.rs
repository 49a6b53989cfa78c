// Heading extraction from raw HTML.

use anyhow::Result;
use scraper::{Html, Selector};

/// Default selector: third-level headings.
pub const DEFAULT_HEADING_SELECTOR: &str = "h3";

/// Parse a CSS selector, turning the selector error into a readable message.
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid heading selector {selector:?}: {e:?}"))
}

/// Text content of every element matching `selector`, in document order.
///
/// Text nodes inside an element are concatenated exactly as they appear in
/// the page; nothing is trimmed or dropped, so a blank heading yields a
/// blank title.
pub fn extract_titles(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .map(|element| element.text().collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_h3_in_document_order() {
        let html = r#"
            <html><body>
              <h1>Site name</h1>
              <h3><a href="/a">Second wave of comets</a></h3>
              <div><h3>Bees <em>count</em> to five</h3></div>
              <h3>Second wave of comets</h3>
            </body></html>
        "#;
        let selector = parse_selector(DEFAULT_HEADING_SELECTOR).unwrap();
        assert_eq!(
            extract_titles(html, &selector),
            vec![
                "Second wave of comets",
                "Bees count to five",
                "Second wave of comets",
            ]
        );
    }

    #[test]
    fn test_text_kept_as_scraped() {
        let html = "<h3>\n  Ice   shelf\n</h3><h3> </h3>";
        let selector = parse_selector("h3").unwrap();
        assert_eq!(
            extract_titles(html, &selector),
            vec!["\n  Ice   shelf\n", " "]
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        let selector = parse_selector("h3").unwrap();
        assert!(extract_titles("<html><body><h2>Only h2</h2></body></html>", &selector).is_empty());
        assert!(extract_titles("", &selector).is_empty());
    }

    #[test]
    fn test_invalid_selector_rejected() {
        assert!(parse_selector("h3[").is_err());
    }
}

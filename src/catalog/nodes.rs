// Conversion of an already-fetched catalog page into the flat block sequence
// the parser consumes. Fetching the page is the caller's problem; this module
// only ever sees an HTML string.

use scraper::{Html, Selector};

use crate::errors::{CatalogError, Result};
use crate::models::CatalogNode;

/// Catalog years with a stable page structure. Earlier catalogs vary too much
/// to be worth supporting.
pub const VALID_YEARS: [i32; 3] = [2021, 2022, 2023];

const CATALOG_URLS: [(i32, &str); 3] = [
    (2021, "https://catalog.cpp.edu/preview_program.php?catoid=57&poid=14912"),
    (2022, "https://catalog.cpp.edu/preview_program.php?catoid=61&poid=15936"),
    (2023, "https://catalog.cpp.edu/preview_program.php?catoid=65&poid=17161"),
];

pub fn validate_catalog_year(year: i32) -> Result<()> {
    if VALID_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(CatalogError::Validation(format!(
            "{} is not a valid catalog year",
            year
        )))
    }
}

/// Source URL for a catalog year, for the collaborator that does the fetch.
pub fn catalog_url(year: i32) -> Result<&'static str> {
    validate_catalog_year(year)?;
    CATALOG_URLS
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, url)| *url)
        .ok_or_else(|| CatalogError::Validation(format!("{} is not a valid catalog year", year)))
}

/// Extract the ordered block sequence from a catalog page. Each
/// `div.acalog-core` block contributes its first `h2` as an area heading, its
/// first `h3` as a section heading, and every `li.acalog-course span` as a
/// course span. Blocks with none of those come through empty (the parser
/// treats them as no-ops).
pub fn extract_catalog_nodes(html: &str) -> Vec<CatalogNode> {
    let document = Html::parse_document(html);

    // these literals are valid CSS selectors, parse cannot fail on them
    let block_sel = Selector::parse("div.acalog-core").unwrap();
    let area_sel = Selector::parse("h2").unwrap();
    let section_sel = Selector::parse("h3").unwrap();
    let course_sel = Selector::parse("li.acalog-course span").unwrap();

    let mut nodes = Vec::new();
    for block in document.select(&block_sel) {
        let area_heading = block.select(&area_sel).next().map(element_text);
        let section_heading = block.select(&section_sel).next().map(element_text);
        let course_spans: Vec<String> = block.select(&course_sel).map(element_text).collect();

        nodes.push(CatalogNode {
            area_heading,
            section_heading,
            course_spans,
        });
    }
    nodes
}

fn element_text(element: scraper::ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_minimal_page() {
        let html = r#"
            <html><body>
            <div class="acalog-core"><h2>Area A English Language Communication</h2></div>
            <div class="acalog-core">
                <h3>1. Oral Communication (3 units)</h3>
                <ul>
                    <li class="acalog-course"><span>COM 100 - Public Speaking (C)</span></li>
                    <li class="acalog-course"><span>COM 204 - Argumentation (C)</span></li>
                </ul>
            </div>
            <div class="acalog-core"><p>filler block</p></div>
            </body></html>
        "#;

        let nodes = extract_catalog_nodes(html);
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[0].area_heading.as_deref(),
            Some("Area A English Language Communication")
        );
        assert_eq!(
            nodes[1].section_heading.as_deref(),
            Some("1. Oral Communication (3 units)")
        );
        assert_eq!(
            nodes[1].course_spans,
            vec![
                "COM 100 - Public Speaking (C)",
                "COM 204 - Argumentation (C)"
            ]
        );
        assert!(nodes[2].area_heading.is_none());
        assert!(nodes[2].course_spans.is_empty());
    }

    #[test]
    fn test_catalog_year_table() {
        assert!(validate_catalog_year(2023).is_ok());
        assert!(catalog_url(2022).unwrap().contains("catoid=61"));
        assert!(matches!(
            catalog_url(2019),
            Err(CatalogError::Validation(_))
        ));
    }
}

// Splitting of combined "CODE - Title" course labels. The parser, the
// recommendation engine and the catalog-wide ranker all go through these two
// functions; there is no second implementation anywhere.

use crate::errors::{CatalogError, Result};

/// Course code part of a label: everything before the `" - "` separator.
/// The separator is located by its `'-'`; the character before it (the
/// space) is dropped with it.
pub fn split_code(label: &str) -> Result<&str> {
    let dash = label
        .find('-')
        .ok_or_else(|| CatalogError::MalformedLabel(label.to_string()))?;
    if dash == 0 || !label.is_char_boundary(dash - 1) {
        return Err(CatalogError::MalformedLabel(label.to_string()));
    }
    Ok(&label[..dash - 1])
}

/// Title part of a label: everything starting two characters after the first
/// `'-'` (skipping the dash and the space that follows it).
pub fn split_title(label: &str) -> Result<&str> {
    let dash = label
        .find('-')
        .ok_or_else(|| CatalogError::MalformedLabel(label.to_string()))?;
    let mut rest = label[dash + 1..].chars();
    if rest.next().is_none() {
        return Err(CatalogError::MalformedLabel(label.to_string()));
    }
    Ok(rest.as_str())
}

/// Drop a trailing `" (component)"` suffix when one is present. Labels
/// stored by the parser are already stripped; raw labels straight from the
/// page still carry the suffix.
pub fn strip_component(text: &str) -> &str {
    match text.find('(') {
        Some(open) if open >= 1 && text.is_char_boundary(open - 1) => &text[..open - 1],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_code() {
        assert_eq!(split_code("ENG101 - Composition").unwrap(), "ENG101");
        assert_eq!(split_code("PHL 202 - Ethics").unwrap(), "PHL 202");
    }

    #[test]
    fn test_split_title() {
        assert_eq!(split_title("ENG101 - Composition").unwrap(), "Composition");
        assert_eq!(
            split_title("HST 201 - United States History").unwrap(),
            "United States History"
        );
    }

    #[test]
    fn test_split_recombines() {
        // code + " - " + title gives back the label
        let label = "BIO 115 - Basic Biology";
        let code = split_code(label).unwrap();
        let title = split_title(label).unwrap();
        assert_eq!(format!("{} - {}", code, title), label);
    }

    #[test]
    fn test_missing_separator_fails() {
        assert!(matches!(
            split_code("ENG101 Composition"),
            Err(crate::errors::CatalogError::MalformedLabel(_))
        ));
        assert!(matches!(
            split_title("ENG101 Composition"),
            Err(crate::errors::CatalogError::MalformedLabel(_))
        ));
    }

    #[test]
    fn test_dash_at_start_fails() {
        assert!(split_code("- No code here").is_err());
    }

    #[test]
    fn test_strip_component() {
        assert_eq!(strip_component("Composition (E)"), "Composition");
        assert_eq!(strip_component("Composition"), "Composition");
        assert_eq!(strip_component("(E)"), "(E)");
    }
}

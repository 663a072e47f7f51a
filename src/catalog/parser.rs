// Reconstruction of the area -> section -> course hierarchy from the flat
// block sequence of the catalog page.
//
// The page nests at most one level deep in practice, so the "stack" of open
// areas/sections is two plain cursors; entries always attach to the most
// recently opened parent.

use indexmap::IndexMap;

use crate::errors::{CatalogError, Result};
use crate::models::{AreaMap, CatalogNode, SectionMap};

/// Synthetic section for area E, which has no sub-sections of its own.
pub const SYNTHETIC_SECTION_E: &str = "0. Lifelong Learning and Self-Development";
/// Synthetic section for area F, same situation.
pub const SYNTHETIC_SECTION_F: &str = "0. Ethnic Studies";

/// Area headings carry a fixed "Area X" prefix; the letter sits at character
/// index 5.
const AREA_LETTER_INDEX: usize = 5;

/// Single left-to-right pass over the page blocks. Returns the area map and
/// the section map, both in document order. A section heading containing
/// "Note(s)" ends the pass: everything after it is catalog footnotes.
pub fn parse_catalog(nodes: &[CatalogNode]) -> Result<(AreaMap, SectionMap)> {
    let mut area_map: AreaMap = IndexMap::new();
    let mut section_map: SectionMap = IndexMap::new();

    let mut current_area: Option<String> = None;
    let mut current_section: Option<String> = None;

    'pass: for node in nodes {
        if let Some(heading) = &node.area_heading {
            let letter = heading.chars().nth(AREA_LETTER_INDEX).ok_or_else(|| {
                CatalogError::InvalidInput(format!(
                    "area heading {:?} is too short to carry an area letter",
                    heading
                ))
            })?;
            let area = letter.to_string();

            // E and F have no section headings of their own; open their
            // synthetic section right away so their courses have a home.
            let synthetic = match area.as_str() {
                "E" => Some(SYNTHETIC_SECTION_E),
                "F" => Some(SYNTHETIC_SECTION_F),
                _ => None,
            };
            if let Some(name) = synthetic {
                section_map.insert(name.to_string(), Vec::new());
                current_section = Some(name.to_string());
            }

            area_map.insert(area.clone(), Vec::new());
            current_area = Some(area);
        }

        if let Some(heading) = &node.section_heading {
            if heading.contains("Note(s)") {
                // Hard stop: the remaining blocks are footnotes.
                break 'pass;
            }

            let id = section_id(heading)?;
            let area = current_area.as_ref().ok_or_else(|| {
                CatalogError::InvalidInput(format!(
                    "section heading {:?} appears before any area heading",
                    heading
                ))
            })?;

            section_map.insert(id.clone(), Vec::new());
            area_map.entry(area.clone()).or_default().push(id.clone());
            current_section = Some(id);
        }

        for span in &node.course_spans {
            let label = course_label(span)?;
            let section = current_section.as_ref().ok_or_else(|| {
                CatalogError::InvalidInput(format!(
                    "course span {:?} appears outside any section",
                    span
                ))
            })?;
            section_map
                .entry(section.clone())
                .or_default()
                .push(label.to_string());
        }
    }

    // The synthetic sections are listed under their areas once, after the
    // pass, no matter how many times the E/F headings were seen.
    for (area, name) in [("E", SYNTHETIC_SECTION_E), ("F", SYNTHETIC_SECTION_F)] {
        if let Some(sections) = area_map.get_mut(area) {
            if !sections.iter().any(|s| s == name) {
                sections.push(name.to_string());
            }
        }
    }

    Ok((area_map, section_map))
}

/// Section id: heading truncated one character before the first `'('`, or at
/// the first `':'` when there is no parenthesis.
fn section_id(heading: &str) -> Result<String> {
    if let Some(open) = heading.find('(') {
        if open == 0 || !heading.is_char_boundary(open - 1) {
            return Err(CatalogError::InvalidInput(format!(
                "section heading {:?} starts at its '(' marker",
                heading
            )));
        }
        Ok(heading[..open - 1].to_string())
    } else if let Some(colon) = heading.find(':') {
        Ok(heading[..colon].to_string())
    } else {
        Err(CatalogError::InvalidInput(format!(
            "section heading {:?} has neither a '(' nor a ':' marker",
            heading
        )))
    }
}

/// Stored course label: the span truncated one character before the first
/// `'('` (dropping the " (component)" suffix). A span without the suffix is
/// an error, never silently dropped; the grade join needs a clean code
/// prefix from every stored label.
fn course_label(span: &str) -> Result<&str> {
    let open = span.find('(').ok_or_else(|| {
        CatalogError::InvalidInput(format!(
            "course span {:?} has no \"(component)\" suffix",
            span
        ))
    })?;
    if open == 0 || !span.is_char_boundary(open - 1) {
        return Err(CatalogError::InvalidInput(format!(
            "course span {:?} starts at its '(' marker",
            span
        )));
    }
    Ok(&span[..open - 1])
}

// Exclusion rules applied during the grade join.
//
// Every fixed constant the rules depend on lives in `FilterPolicy`, which is
// passed into the engine and the ranker rather than read from globals, so
// tests can substitute alternate catalogs and policies.

/// Fixed filter configuration for one catalog.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    /// Area-section codes that exist in the catalog. The one-character "E" /
    /// "F" entries are kept for fidelity with the catalog's own listing but
    /// are unreachable: requests must be exactly two characters.
    pub valid_area_sections: Vec<String>,
    /// Course-name words identifying language courses.
    pub language_filter: Vec<String>,
    /// The one area-section code whose queries drop language courses.
    pub language_section_code: String,
    /// The same section by its literal catalog name, for catalog-wide runs.
    pub language_section_name: String,
    /// Trailing label characters marking non-standard offerings.
    pub component_markers: Vec<char>,
    /// (area, section) pair always excluded from catalog-wide ranking.
    pub skip_area: String,
    pub skip_section: String,
    /// List length per section in catalog-wide ranking.
    pub top_n: usize,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy {
            valid_area_sections: [
                "A1", "A2", "A3", "B1", "B2", "B4", "B5", "C1", "C2", "C3", "D1", "D2",
                "D4", "E0", "F0", "E", "F",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            language_filter: ["Chinese", "French", "Spanish", "German"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            language_section_code: "C2".to_string(),
            language_section_name: "2. Literature, Modern Languages, Philosophy and Civilization"
                .to_string(),
            component_markers: vec!['M', 'H', 'L', 'A'],
            skip_area: "B".to_string(),
            skip_section: "3. Laboratory Activity".to_string(),
            top_n: 5,
        }
    }
}

impl FilterPolicy {
    pub fn is_language_filtered_code(&self, code: &str) -> bool {
        code == self.language_section_code
    }

    pub fn is_language_filtered_section(&self, section: &str) -> bool {
        section == self.language_section_name
    }

    /// The B3 quirk: one section of the catalog is never ranked catalog-wide.
    pub fn skips(&self, area: &str, section: &str) -> bool {
        area == self.skip_area && section == self.skip_section
    }
}

/// Honors and Activity offerings never make it into recommendations.
pub fn title_excluded(title: &str) -> bool {
    title.contains("Honors") || title.contains("Activity")
}

/// Language courses are dropped only for the language-filtered section.
pub fn language_excluded(title: &str, policy: &FilterPolicy) -> bool {
    policy.language_filter.iter().any(|lang| title.contains(lang))
}

/// A trailing component marker on the feed label means a variant offering
/// (honors/lab/activity section of the same course).
pub fn component_excluded(label: &str, policy: &FilterPolicy) -> bool {
    match label.chars().last() {
        Some(last) => policy.component_markers.contains(&last),
        None => false,
    }
}

// Wrapper around the externally supplied grade feed. The feed is small
// (a few thousand records), so lookup is a linear scan in feed order.

use serde::{Deserialize, Deserializer};

use crate::errors::{CatalogError, Result};
use crate::models::ExternalCourseRecord;

/// Grade records in feed order, queryable by course-code substring.
#[derive(Debug, Clone, Default)]
pub struct GradeIndex {
    records: Vec<ExternalCourseRecord>,
}

impl GradeIndex {
    pub fn new(records: Vec<ExternalCourseRecord>) -> Self {
        GradeIndex { records }
    }

    /// Parse the feed document (a JSON array of records).
    pub fn from_json(text: &str) -> Result<Self> {
        let records: Vec<ExternalCourseRecord> = serde_json::from_str(text)
            .map_err(|e| CatalogError::InvalidInput(format!("grade feed is not valid JSON: {}", e)))?;
        Ok(GradeIndex { records })
    }

    /// Every record whose label contains `code` as a substring, in feed
    /// order. Containment, not equality: feed labels carry suffixes for
    /// lab/honors variants, and those are meant to match here so downstream
    /// filtering can decide what to keep.
    pub fn find_by_code_substring(&self, code: &str) -> Vec<&ExternalCourseRecord> {
        self.records
            .iter()
            .filter(|r| r.label.contains(code))
            .collect()
    }

    pub fn records(&self) -> &[ExternalCourseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The feed is inconsistent about `AvgGPA`: some records carry a number,
/// some a numeric string, some null. All three deserialize to `Option<f64>`.
pub fn de_avg_gpa<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawGpa {
        Number(f64),
        Text(String),
    }

    match Option::<RawGpa>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawGpa::Number(n)) => Ok(Some(n)),
        Some(RawGpa::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map(Some).map_err(|_| {
                serde::de::Error::custom(format!("AvgGPA {:?} is not numeric", s))
            })
        }
    }
}

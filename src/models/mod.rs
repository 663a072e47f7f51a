// Core data structures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Area -> ordered list of section ids, in document order.
pub type AreaMap = IndexMap<String, Vec<String>>;

/// Section id -> ordered list of course labels, in document order.
pub type SectionMap = IndexMap<String, Vec<String>>;

/// One markup block from the catalog page. A block may open an area, open a
/// section, carry course spans, any combination, or none of them.
#[derive(Debug, Clone, Default)]
pub struct CatalogNode {
    pub area_heading: Option<String>,
    pub section_heading: Option<String>,
    pub course_spans: Vec<String>,
}

/// One record of the external grade feed. Field names follow the feed's JSON
/// contract verbatim. `AvgGPA` arrives as a number, a numeric string, or
/// null; all three land in `avg_gpa`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalCourseRecord {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "CourseTitle")]
    pub course_title: Option<String>,
    #[serde(
        rename = "AvgGPA",
        default,
        deserialize_with = "crate::gpa::de_avg_gpa"
    )]
    pub avg_gpa: Option<f64>,
}

/// A single ranked recommendation. `avg_gpa` is 0.0 when the feed had no
/// grade data for the course, rounded to two decimals otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecommendation {
    #[serde(rename = "courseCode")]
    pub course_code: String,
    #[serde(rename = "courseTitle")]
    pub course_title: String,
    #[serde(rename = "avgGPA")]
    pub avg_gpa: f64,
}

/// Serialized full-catalog categorization, one document per catalog year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub year: i32,
    pub areas: Vec<AreaData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaData {
    pub area: String,
    pub sections: Vec<SectionData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionData {
    pub section: String,
    pub courses: Vec<CourseEntry>,
}

/// Course entry as stored in the categorized document: the full stripped
/// label under `courseCode`, and the raw (unrounded, nullable) feed GPA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEntry {
    #[serde(rename = "courseCode")]
    pub course_code: String,
    #[serde(rename = "averageGPA")]
    pub average_gpa: Option<f64>,
}

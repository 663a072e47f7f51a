// Single-query recommendation: validate the requested area-section, resolve
// it against the parsed maps, join against the grade feed, filter, rank.

use crate::catalog::labels::strip_component;
use crate::catalog::{split_code, split_title};
use crate::errors::{CatalogError, Result};
use crate::gpa::GradeIndex;
use crate::models::{AreaMap, CourseRecommendation, SectionMap};
use crate::recommend::filters::{self, FilterPolicy};

/// Recommend courses for a two-character area-section request ("A1", "C2",
/// "E0", ...), best historical GPA first.
pub fn recommend(
    area_section: &str,
    area_map: &AreaMap,
    section_map: &SectionMap,
    grades: &GradeIndex,
    policy: &FilterPolicy,
) -> Result<Vec<CourseRecommendation>> {
    let (area, section_digit, code) = validate_area_section(area_section, policy)?;

    let sections = area_map.get(&area).ok_or_else(|| {
        CatalogError::NoMatch(format!("area {} does not exist in this catalog", area))
    })?;

    // first section whose id contains the requested digit
    let labels = sections
        .iter()
        .find(|s| s.contains(section_digit))
        .and_then(|s| section_map.get(s))
        .filter(|l| !l.is_empty())
        .ok_or_else(|| {
            CatalogError::NoMatch(format!("no sections found for query {:?}", area_section))
        })?;

    let mut recs = collect_recommendations(
        labels,
        grades,
        policy,
        policy.is_language_filtered_code(&code),
    )?;
    sort_by_gpa_desc(&mut recs);
    Ok(recs)
}

/// Fail-fast request validation. Each rule reports its own condition so the
/// caller can tell a digit-for-area mistake from an unknown code.
fn validate_area_section(
    area_section: &str,
    policy: &FilterPolicy,
) -> Result<(String, char, String)> {
    let chars: Vec<char> = area_section.chars().collect();
    if chars.len() != 2 {
        return Err(CatalogError::Validation(format!(
            "requested area section {:?} must be 2 characters",
            area_section
        )));
    }

    let area = chars[0].to_ascii_uppercase();
    let section = chars[1];

    if area.is_ascii_digit() {
        return Err(CatalogError::Validation(format!(
            "area {:?} must be a character",
            area
        )));
    }
    if section.is_alphabetic() {
        return Err(CatalogError::Validation(format!(
            "section {:?} must be a number",
            section
        )));
    }

    let code = format!("{}{}", area, section);
    if !policy.valid_area_sections.iter().any(|c| *c == code) {
        let mut message = format!("{} is an invalid area section", code);
        if let Some(closest) = closest_valid_code(&code, policy) {
            message.push_str(&format!(" (closest valid code: {})", closest));
        }
        return Err(CatalogError::Validation(message));
    }

    Ok((area.to_string(), section, code))
}

fn closest_valid_code<'a>(code: &str, policy: &'a FilterPolicy) -> Option<&'a str> {
    policy
        .valid_area_sections
        .iter()
        .map(|c| (strsim::jaro_winkler(code, c), c.as_str()))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c)
}

/// Join one section's course labels against the grade feed and apply the
/// exclusion filters. Shared by the single-query engine and the catalog-wide
/// ranker so the two can never disagree on join semantics.
pub(crate) fn collect_recommendations(
    labels: &[String],
    grades: &GradeIndex,
    policy: &FilterPolicy,
    language_filtered: bool,
) -> Result<Vec<CourseRecommendation>> {
    let mut recs = Vec::new();

    for label in labels {
        let code = split_code(label)?;

        for record in grades.find_by_code_substring(code) {
            let title = match &record.course_title {
                Some(t) => t.clone(),
                // the feed sometimes carries no title; the catalog label has
                // one, minus whatever component suffix it still carries
                None => strip_component(split_title(label)?).to_string(),
            };

            if filters::title_excluded(&title) {
                eprintln!("   excluding {}: honors/activity offering", record.label);
                continue;
            }
            if language_filtered && filters::language_excluded(&title, policy) {
                eprintln!("   excluding {}: language course", record.label);
                continue;
            }
            if filters::component_excluded(&record.label, policy) {
                continue;
            }

            recs.push(CourseRecommendation {
                course_code: code.to_string(),
                course_title: title,
                avg_gpa: round2(record.avg_gpa.unwrap_or(0.0)),
            });
        }
    }

    Ok(recs)
}

/// Stable descending sort; ties keep join order.
pub(crate) fn sort_by_gpa_desc(recs: &mut [CourseRecommendation]) {
    recs.sort_by(|a, b| b.avg_gpa.total_cmp(&a.avg_gpa));
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

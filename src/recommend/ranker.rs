// Catalog-wide ranking and the full-catalog categorization document.

use indexmap::IndexMap;

use crate::catalog::split_code;
use crate::errors::{CatalogError, Result};
use crate::gpa::GradeIndex;
use crate::models::{
    AreaData, AreaMap, CatalogData, CourseEntry, CourseRecommendation, SectionData, SectionMap,
};
use crate::recommend::engine::{collect_recommendations, sort_by_gpa_desc};
use crate::recommend::filters::FilterPolicy;

/// Top-N recommendations for every (area, section) pair of the catalog,
/// keyed by area code + full section id, in document order. Applies the same
/// join and filters as the single-query engine; the language filter is keyed
/// off the literal section name here, and the policy's skip pair is left out
/// entirely.
pub fn rank_all(
    area_map: &AreaMap,
    section_map: &SectionMap,
    grades: &GradeIndex,
    policy: &FilterPolicy,
) -> Result<IndexMap<String, Vec<CourseRecommendation>>> {
    let mut rankings: IndexMap<String, Vec<CourseRecommendation>> = IndexMap::new();

    for (area, sections) in area_map {
        for section in sections {
            if policy.skips(area, section) {
                continue;
            }

            let labels = section_map.get(section).ok_or_else(|| {
                CatalogError::NoMatch(format!(
                    "section {:?} is listed under area {} but has no course list",
                    section, area
                ))
            })?;

            let mut recs = collect_recommendations(
                labels,
                grades,
                policy,
                policy.is_language_filtered_section(section),
            )?;
            sort_by_gpa_desc(&mut recs);
            recs.truncate(policy.top_n);

            rankings.insert(format!("{}{}", area, section), recs);
        }
    }

    Ok(rankings)
}

/// Assemble the serialized catalog document for one year: every area, every
/// section of that area, every stored course label with the feed GPA
/// attached. No exclusion filters and no rounding at this layer; a course
/// nothing in the feed matches keeps a null GPA. When several feed records
/// match a course code, the last one wins.
pub fn categorize(
    year: i32,
    area_map: &AreaMap,
    section_map: &SectionMap,
    grades: &GradeIndex,
) -> Result<CatalogData> {
    let mut areas = Vec::new();

    for (area, sections) in area_map {
        let mut section_datas = Vec::new();

        for section in sections {
            let labels = section_map.get(section).ok_or_else(|| {
                CatalogError::NoMatch(format!(
                    "section {:?} is listed under area {} but has no course list",
                    section, area
                ))
            })?;

            let mut courses = Vec::new();
            for label in labels {
                let code = split_code(label)?;

                let mut average_gpa = None;
                for record in grades.find_by_code_substring(code) {
                    average_gpa = record.avg_gpa;
                }

                courses.push(CourseEntry {
                    course_code: label.clone(),
                    average_gpa,
                });
            }

            section_datas.push(SectionData {
                section: section.clone(),
                courses,
            });
        }

        areas.push(AreaData {
            area: area.clone(),
            sections: section_datas,
        });
    }

    Ok(CatalogData { year, areas })
}

/// In-place sort of every section's course list, best GPA first. Courses
/// with no grade data sink to the bottom rather than ranking as 0.
pub fn sort_catalog_courses(catalog: &mut CatalogData) {
    for area in &mut catalog.areas {
        for section in &mut area.sections {
            section.courses.sort_by(|a, b| {
                let a_gpa = a.average_gpa.unwrap_or(f64::NEG_INFINITY);
                let b_gpa = b.average_gpa.unwrap_or(f64::NEG_INFINITY);
                b_gpa.total_cmp(&a_gpa)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExternalCourseRecord;
    use indexmap::IndexMap;

    fn record(label: &str, title: Option<&str>, gpa: Option<f64>) -> ExternalCourseRecord {
        ExternalCourseRecord {
            label: label.to_string(),
            course_title: title.map(|t| t.to_string()),
            avg_gpa: gpa,
        }
    }

    #[test]
    fn test_categorize_last_match_wins_and_null_survives() {
        let mut area_map: AreaMap = IndexMap::new();
        area_map.insert("A".to_string(), vec!["1. English".to_string()]);
        let mut section_map: SectionMap = IndexMap::new();
        section_map.insert(
            "1. English".to_string(),
            vec![
                "ENG101 - Composition".to_string(),
                "PHL 330 - Logic".to_string(),
            ],
        );
        let grades = GradeIndex::new(vec![
            record("ENG101", Some("Composition"), Some(3.1)),
            record("ENG101H", Some("Honors Composition"), Some(3.6)),
        ]);

        let catalog = categorize(2023, &area_map, &section_map, &grades).unwrap();
        assert_eq!(catalog.year, 2023);
        let courses = &catalog.areas[0].sections[0].courses;
        // full label as the course key, last matching record's GPA
        assert_eq!(courses[0].course_code, "ENG101 - Composition");
        assert_eq!(courses[0].average_gpa, Some(3.6));
        // nothing in the feed matched, GPA stays null
        assert_eq!(courses[1].course_code, "PHL 330 - Logic");
        assert_eq!(courses[1].average_gpa, None);
    }

    #[test]
    fn test_sort_catalog_courses_nulls_last() {
        let mut catalog = CatalogData {
            year: 2023,
            areas: vec![AreaData {
                area: "A".to_string(),
                sections: vec![SectionData {
                    section: "1. English".to_string(),
                    courses: vec![
                        CourseEntry {
                            course_code: "a".to_string(),
                            average_gpa: None,
                        },
                        CourseEntry {
                            course_code: "b".to_string(),
                            average_gpa: Some(2.1),
                        },
                        CourseEntry {
                            course_code: "c".to_string(),
                            average_gpa: Some(3.9),
                        },
                    ],
                }],
            }],
        };

        sort_catalog_courses(&mut catalog);
        let order: Vec<&str> = catalog.areas[0].sections[0]
            .courses
            .iter()
            .map(|c| c.course_code.as_str())
            .collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }
}

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Instant;

use crate::analytics;
use crate::catalog::{extract_catalog_nodes, parse_catalog, validate_catalog_year};
use crate::errors::CatalogError;
use crate::gpa::GradeIndex;
use crate::models::{AreaMap, CourseRecommendation, SectionMap};
use crate::recommend::{categorize, rank_all, recommend, sort_catalog_courses, FilterPolicy};

/// The excluded fetch collaborators drop their documents here; the API reads
/// them per request so a refreshed file is picked up without a restart.
fn catalog_html_path() -> String {
    env::var("CATALOG_HTML_PATH").unwrap_or_else(|_| "data/catalog.html".to_string())
}

fn grade_data_path() -> String {
    env::var("GRADE_DATA_PATH").unwrap_or_else(|_| "data/grades.json".to_string())
}

/// Read both input documents and run the parse. Everything downstream works
/// on the returned owned maps; nothing is shared between requests.
fn load_inputs() -> Result<(AreaMap, SectionMap, GradeIndex), HttpResponse> {
    let _ = dotenv::dotenv();

    let html_path = catalog_html_path();
    let html = std::fs::read_to_string(&html_path).map_err(|e| {
        HttpResponse::InternalServerError()
            .json(json!({"error": format!("failed to read catalog page {}: {}", html_path, e)}))
    })?;

    let feed_path = grade_data_path();
    let feed = std::fs::read_to_string(&feed_path).map_err(|e| {
        HttpResponse::InternalServerError()
            .json(json!({"error": format!("failed to read grade feed {}: {}", feed_path, e)}))
    })?;

    let nodes = extract_catalog_nodes(&html);
    let (area_map, section_map) = parse_catalog(&nodes).map_err(|e| error_response(&e))?;
    let grades = GradeIndex::from_json(&feed).map_err(|e| error_response(&e))?;

    Ok((area_map, section_map, grades))
}

fn error_response(err: &CatalogError) -> HttpResponse {
    let body = json!({"error": format!("{}", err)});
    match err {
        CatalogError::NoMatch(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[derive(Debug, Deserialize)]
struct RecommendQuery {
    area_section: String,
}

#[derive(Debug, Deserialize)]
struct RecommendRequest {
    area_section: String,
}

#[derive(Debug, Deserialize)]
struct YearQuery {
    year: Option<i32>,
}

/// Latest catalog year with data; used when the client does not pick one.
const DEFAULT_CATALOG_YEAR: i32 = 2023;

fn serve_recommendation(area_section: &str) -> HttpResponse {
    let started = Instant::now();

    let (area_map, section_map, grades) = match load_inputs() {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let policy = FilterPolicy::default();
    match recommend(area_section, &area_map, &section_map, &grades, &policy) {
        Ok(recs) => {
            let duration_ms = started.elapsed().as_millis() as i64;
            if let Err(e) =
                analytics::log_query("/recommend", Some(area_section), recs.len(), duration_ms)
            {
                eprintln!("analytics logging failed: {}", e);
            }

            // ordered [courseCode, courseTitle, avgGPA] triples
            let triples: Vec<serde_json::Value> = recs
                .iter()
                .map(|r: &CourseRecommendation| json!([r.course_code, r.course_title, r.avg_gpa]))
                .collect();
            HttpResponse::Ok().json(json!({"courses": triples}))
        }
        Err(e) => error_response(&e),
    }
}

async fn recommend_get_handler(query: web::Query<RecommendQuery>) -> impl Responder {
    serve_recommendation(&query.area_section)
}

async fn recommend_post_handler(body: web::Json<RecommendRequest>) -> impl Responder {
    serve_recommendation(&body.area_section)
}

/// GET /rankings
/// Top-5 courses for every area-section of the catalog, keyed by area code +
/// section id.
async fn rankings_handler() -> impl Responder {
    let started = Instant::now();

    let (area_map, section_map, grades) = match load_inputs() {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let policy = FilterPolicy::default();
    match rank_all(&area_map, &section_map, &grades, &policy) {
        Ok(rankings) => {
            let duration_ms = started.elapsed().as_millis() as i64;
            if let Err(e) = analytics::log_query("/rankings", None, rankings.len(), duration_ms) {
                eprintln!("analytics logging failed: {}", e);
            }
            HttpResponse::Ok().json(json!({"rankings": rankings}))
        }
        Err(e) => error_response(&e),
    }
}

/// GET /categorize?year=2023
/// The full-catalog categorization document for one year.
async fn categorize_handler(query: web::Query<YearQuery>) -> impl Responder {
    let year = query.year.unwrap_or(DEFAULT_CATALOG_YEAR);
    if let Err(e) = validate_catalog_year(year) {
        return error_response(&e);
    }

    let (area_map, section_map, grades) = match load_inputs() {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match categorize(year, &area_map, &section_map, &grades) {
        Ok(catalog) => HttpResponse::Ok().json(catalog),
        Err(e) => error_response(&e),
    }
}

/// GET /topcourses?year=2023
/// Same document with every section's courses sorted best-GPA-first, courses
/// without grade data last. This is the query the web front-end renders.
async fn topcourses_handler(query: web::Query<YearQuery>) -> impl Responder {
    let year = query.year.unwrap_or(DEFAULT_CATALOG_YEAR);
    if let Err(e) = validate_catalog_year(year) {
        return error_response(&e);
    }

    let (area_map, section_map, grades) = match load_inputs() {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match categorize(year, &area_map, &section_map, &grades) {
        Ok(mut catalog) => {
            sort_catalog_courses(&mut catalog);
            HttpResponse::Ok().json(json!({"topCourses": catalog}))
        }
        Err(e) => error_response(&e),
    }
}

async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "GE course recommendation API. Courses are ranked by historical average GPA from the external grade feed.",
        "endpoints": {
            "GET /recommend?area_section=A1": "ranked [courseCode, courseTitle, avgGPA] triples for one area-section",
            "POST /recommend": "same, with body {\"area_section\": \"A1\"}",
            "GET /rankings": "top-5 courses for every area-section of the catalog",
            "GET /categorize?year=2023": "full catalog hierarchy with GPAs attached",
            "GET /topcourses?year=2023": "catalog hierarchy with courses sorted by GPA"
        },
        "post_example": json!({"area_section": "C2"}),
        "area_section_codes": ["A1", "A2", "A3", "B1", "B2", "B4", "B5", "C1", "C2", "C3", "D1", "D2", "D4", "E0", "F0"],
        "note": "Input documents are read from CATALOG_HTML_PATH (default data/catalog.html) and GRADE_DATA_PATH (default data/grades.json)."
    });

    HttpResponse::Ok().json(help)
}

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    if let Err(e) = analytics::init_db() {
        eprintln!("analytics DB unavailable: {}", e);
    }

    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .route("/recommend", web::get().to(recommend_get_handler))
            .route("/recommend", web::post().to(recommend_post_handler))
            .route("/rankings", web::get().to(rankings_handler))
            .route("/categorize", web::get().to(categorize_handler))
            .route("/topcourses", web::get().to(topcourses_handler))
            .route("/help", web::get().to(help_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}

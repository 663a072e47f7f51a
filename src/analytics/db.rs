// Best-effort query log. Every served recommendation query gets a row; a
// failure to log never fails the request.

use chrono::Utc;
use rusqlite::{params, Connection};
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Path to the analytics DB. Honors ANALYTICS_DB_PATH so deployments can move
/// it off the working directory.
pub fn analytics_db_path() -> PathBuf {
    load_dotenv();
    match env::var("ANALYTICS_DB_PATH") {
        Ok(p) => PathBuf::from(p),
        Err(_) => PathBuf::from("analytics/queries.db"),
    }
}

/// Create the DB directory, file and table if missing.
pub fn init_db() -> Result<(), Box<dyn Error>> {
    let db_path = analytics_db_path();
    if let Some(dir) = db_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let conn = Connection::open(db_path)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS queries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts TEXT NOT NULL,
            endpoint TEXT NOT NULL,
            requested_key TEXT,
            result_count INTEGER,
            duration_ms INTEGER
        )",
        [],
    )?;
    Ok(())
}

/// Insert one served-query row. Opens a short-lived connection.
pub fn log_query(
    endpoint: &str,
    requested_key: Option<&str>,
    result_count: usize,
    duration_ms: i64,
) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(analytics_db_path())?;
    let ts = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO queries (ts, endpoint, requested_key, result_count, duration_ms)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![ts, endpoint, requested_key, result_count as i64, duration_ms],
    )?;
    Ok(())
}

/// Most-requested area-section codes, most popular first.
pub fn top_requested_codes(limit: usize) -> Result<Vec<(String, i64)>, Box<dyn Error>> {
    let conn = Connection::open(analytics_db_path())?;
    let mut stmt = conn.prepare(
        "SELECT requested_key, COUNT(*) as n FROM queries
         WHERE requested_key IS NOT NULL
         GROUP BY requested_key ORDER BY n DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

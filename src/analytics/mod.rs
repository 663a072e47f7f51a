pub mod db;

pub use db::{analytics_db_path, init_db, log_query, top_requested_codes};

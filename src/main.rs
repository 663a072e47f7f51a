// --- GE Course Recommender - entry point ---

use gerank::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    println!("=== GE Course Recommender (API) ===");
    let bind = "127.0.0.1:8080";
    println!("Starting server on http://{}", bind);
    run_server(bind).await
}

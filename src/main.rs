use dotenv::dotenv;
use tracing::{info, warn};

use obralink_backend::app::app::App;
use obralink_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Guards must stay alive for the lifetime of the process so the
    // non-blocking file writers keep flushing.
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("Starting Obralink Backend Application");

    match dotenv() {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}

use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use storefront_backend::app::app::App;

#[tokio::main]
async fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();

    info!("Starting storefront backend");

    match dotenv() {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}

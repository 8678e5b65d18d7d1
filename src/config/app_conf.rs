use std::env;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Origin of the storefront SPA, used for CORS and OAuth redirects.
    pub frontend_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let frontend_origin =
            env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());
        AppConfig { host, port, frontend_origin }
    }
}

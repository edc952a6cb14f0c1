use super::RequestsLoggingLevel;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    /// Shared secret for job mutations and admin stats. When unset, every
    /// guarded route answers 401.
    pub api_key: Option<String>,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 8000,
            metrics_port: 9091,
            api_key: None,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
        }
    }
}

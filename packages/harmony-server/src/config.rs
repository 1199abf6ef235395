/// Configuration for starting the API server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API cross-site; `*` allows any
    pub allowed_origins: Vec<String>,
    /// Number of threads running request handlers
    pub workers: usize,
}

/// Handler threads when none are configured
pub const DEFAULT_WORKERS: usize = 8;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            allowed_origins: vec!["*".into()],
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Split a comma-separated origin list. An empty list means any origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();
    if origins.is_empty() {
        vec!["*".into()]
    } else {
        origins
    }
}

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub log_level: Option<String>,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, log_level: Option<String>) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            log_level: log_level.filter(|l| !l.trim().is_empty()),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            std::env::var("LOG_LEVEL").ok(),
        )
    }
}

use config::{Config, ConfigBuilder, File, builder::DefaultState};
use serde::Deserialize;

use super::Environment;
use crate::domain::{ChunkingOptions, ChunkingStrategy};
use crate::infrastructure::llm::DEFAULT_GEMINI_BASE_URL;

/// Flat environment variables and the settings keys they override.
const ENV_OVERRIDES: [(&str, &str); 20] = [
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("DB_SSL_MODE", "database.ssl_mode"),
    ("DB_MAX_CONNECTIONS", "database.max_connections"),
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("GEMINI_TEXT_MODEL", "gemini.text_model"),
    ("GEMINI_EMBEDDING_MODEL", "gemini.embedding_model"),
    ("GEMINI_BASE_URL", "gemini.base_url"),
    ("EMBEDDING_DIMENSIONS", "embeddings.dimensions"),
    ("CHUNK_STRATEGY", "chunking.strategy"),
    ("CHUNK_SIZE", "chunking.max_chunk_size"),
    ("CHUNK_OVERLAP", "chunking.chunk_overlap"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(skip)]
    pub environment: Environment,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub gemini: GeminiSettings,
    pub embeddings: EmbeddingsSettings,
    pub chunking: ChunkingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Takes precedence over the individual connection fields when set.
    #[serde(default)]
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                self.user, self.password, self.host, self.port, self.name, self.ssl_mode
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    pub text_model: String,
    pub embedding_model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub dimensions: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub strategy: ChunkingStrategy,
    pub max_chunk_size: usize,
    pub chunk_overlap: usize,
}

impl ChunkingSettings {
    pub fn options(&self) -> ChunkingOptions {
        ChunkingOptions::new(self.strategy, self.max_chunk_size, self.chunk_overlap)
    }

    /// Accepted, but every fixed-size step then advances by a whole window.
    pub fn overlap_exceeds_size(&self) -> bool {
        self.chunk_overlap >= self.max_chunk_size
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub level: Option<String>,
    pub format: String,
}

impl LoggingSettings {
    pub fn json_format(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Settings {
    /// Reads `.env`, `APP_ENVIRONMENT`, an optional `appsettings.{environment}` file and
    /// the process environment, in increasing precedence.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(SettingsError::InvalidEnvironment)?;

        Self::build(environment, |key| std::env::var(key).ok())
    }

    /// Builds settings from defaults plus whatever `lookup` returns for each variable.
    /// Empty values count as unset.
    pub fn build<F>(environment: Environment, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = defaults()?.add_source(
            File::with_name(&format!("appsettings.{}", environment.as_str()))
                .required(false),
        );

        for (var, key) in ENV_OVERRIDES {
            let value = lookup(var).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.environment = environment;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "GEMINI_API_KEY is required".to_string(),
            ));
        }
        if self.embeddings.dimensions == 0 {
            return Err(SettingsError::Invalid(
                "EMBEDDING_DIMENSIONS must be greater than zero".to_string(),
            ));
        }
        if self.chunking.max_chunk_size == 0 {
            return Err(SettingsError::Invalid(
                "CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432)?
        .set_default("database.user", "postgres")?
        .set_default("database.password", "postgres")?
        .set_default("database.name", "ragdb")?
        .set_default("database.ssl_mode", "disable")?
        .set_default("database.max_connections", 10)?
        .set_default("gemini.api_key", "")?
        .set_default("gemini.text_model", "gemini-1.5-pro")?
        .set_default("gemini.embedding_model", "embedding-001")?
        .set_default("gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
        .set_default("embeddings.dimensions", 768)?
        .set_default("chunking.strategy", ChunkingStrategy::default().as_str())?
        .set_default("chunking.max_chunk_size", 1000)?
        .set_default("chunking.chunk_overlap", 100)?
        .set_default("logging.format", "text")
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    InvalidEnvironment(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

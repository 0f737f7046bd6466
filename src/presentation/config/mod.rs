mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, DatabaseSettings, EmbeddingsSettings, GeminiSettings, LoggingSettings,
    ServerSettings, Settings, SettingsError,
};

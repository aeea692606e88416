mod settings;

pub use settings::{Config, ConfigError, TomlConfig, API_KEY_ENV};

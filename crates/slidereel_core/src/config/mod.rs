//! Configuration management.
//!
//! Settings live in a TOML file split into sections (`[paths]`, `[encode]`,
//! `[logging]`). The manager handles load-or-create on first run and atomic
//! saves.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{EncodeSettings, LoggingSettings, PathSettings, Settings};

//! Config manager for loading and saving settings.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Load-or-create semantics for first runs
//! - Serde defaults fill in missing keys on load

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::Settings;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages application configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Changes are only in memory until `save()` is called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load config from file. Errors if the file does not exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }
        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load config from file, creating it with defaults if missing.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            self.load()
        } else {
            if let Some(parent) = self.config_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            self.settings = Settings::default();
            self.save()
        }
    }

    /// Ensure the configured output, scratch, and logs directories exist.
    pub fn ensure_dirs_exist(&self) -> ConfigResult<()> {
        let dirs = [
            &self.settings.paths.output_folder,
            &self.settings.paths.scratch_root,
            &self.settings.paths.logs_folder,
        ];
        for dir in dirs {
            let path = PathBuf::from(dir);
            if !path.exists() {
                fs::create_dir_all(&path)?;
            }
        }
        Ok(())
    }

    /// Get the logs folder path.
    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.logs_folder)
    }

    /// Get the scratch root path.
    pub fn scratch_root(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.scratch_root)
    }

    /// Get the output folder path.
    pub fn output_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.output_folder)
    }

    /// Save the config atomically.
    ///
    /// Writes to a temp file in the same directory, then renames over the
    /// target so a crash never leaves a half-written config behind.
    pub fn save(&self) -> ConfigResult<()> {
        let mut content = String::from("# SlideReel configuration\n\n");
        content.push_str(&toml::to_string_pretty(&self.settings)?);

        let tmp_path = self.config_path.with_extension("toml.tmp");
        fs::write(&tmp_path, &content)?;
        fs::rename(&tmp_path, &self.config_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_errors() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_or_create_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slidereel.toml");
        let mut manager = ConfigManager::new(&path);

        manager.load_or_create().unwrap();

        assert!(path.exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[encode]"));
        assert!(content.contains("frame_rate = 30"));
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slidereel.toml");

        let mut manager = ConfigManager::new(&path);
        manager.load_or_create().unwrap();
        manager.settings_mut().encode.frame_rate = 24;
        manager.settings_mut().paths.output_folder = "deck_out".to_string();
        manager.save().unwrap();

        let mut reloaded = ConfigManager::new(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().encode.frame_rate, 24);
        assert_eq!(reloaded.settings().paths.output_folder, "deck_out");
    }

    #[test]
    fn ensure_dirs_creates_configured_folders() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("slidereel.toml"));
        manager.settings_mut().paths.output_folder =
            dir.path().join("out").to_string_lossy().to_string();
        manager.settings_mut().paths.scratch_root =
            dir.path().join("scratch").to_string_lossy().to_string();
        manager.settings_mut().paths.logs_folder =
            dir.path().join("logs").to_string_lossy().to_string();

        manager.ensure_dirs_exist().unwrap();

        assert!(dir.path().join("out").is_dir());
        assert!(dir.path().join("scratch").is_dir());
        assert!(dir.path().join("logs").is_dir());
    }
}

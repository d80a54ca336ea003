use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR_NAME: &str = "todo-tui";

/// Theme options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    Ocean,
}

impl ThemeMode {
    /// Next theme in the cycle
    pub fn next(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Ocean,
            ThemeMode::Ocean => ThemeMode::Dark,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
            ThemeMode::Ocean => "Ocean",
        }
    }
}

/// Language options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum Language {
    #[default]
    English,
    Japanese,
}

impl Language {
    pub fn next(&self) -> Self {
        match self {
            Language::English => Language::Japanese,
            Language::Japanese => Language::English,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme mode selection
    pub theme_mode: ThemeMode,
    /// Language selection
    pub language: Language,
    /// Show help overlay
    pub show_help: bool,
    /// Directory holding saved todos and the log file
    pub data_dir: Option<PathBuf>,
    /// How long status notices stay visible (minimum 1 second, default 3)
    pub status_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            language: Language::default(),
            show_help: false,
            data_dir: None,
            status_timeout_secs: 3,
        }
    }
}

impl Config {
    /// Load configuration from `path`, creating a default file if not found.
    ///
    /// An unreadable or unparseable file yields the default configuration.
    /// Anything that went wrong is handed back for the caller to log, since
    /// this runs before logging is set up.
    pub fn load_from(path: &Path) -> (Self, Option<anyhow::Error>) {
        if path.exists() {
            match Self::read(path) {
                Ok(config) => (config, None),
                // Fall back to defaults without overwriting the file
                Err(e) => (
                    Config::default(),
                    Some(e.context(format!("invalid config at {}", path.display()))),
                ),
            }
        } else {
            let default_config = Config::default();
            let warning = default_config
                .save_to(path)
                .context("could not write default config")
                .err();
            (default_config, warning)
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;
        // A zero timeout on disk is clamped up to the minimum
        let secs = config.status_timeout().as_secs();
        config.set_status_timeout(secs);
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;

        // Use XDG config directory standard or fallback to ~/.config
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            home_dir.join(".config")
        };

        Ok(config_dir.join(APP_DIR_NAME).join("config.json"))
    }

    /// Directory for saved todos, honoring the `data_dir` override
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not find a data directory"))?;

        Ok(data_dir.join(APP_DIR_NAME))
    }

    /// Set status timeout with validation (minimum 1 second)
    pub fn set_status_timeout(&mut self, seconds: u64) {
        if seconds >= 1 {
            self.status_timeout_secs = seconds;
        }
    }

    /// Get status timeout as Duration, never shorter than one second
    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs.max(1))
    }

    /// Cycle to the next theme
    pub fn cycle_theme(&mut self) {
        self.theme_mode = self.theme_mode.next();
    }

    /// Cycle to the next language
    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme_mode, ThemeMode::Dark);
        assert_eq!(config.language, Language::English);
        assert!(!config.show_help);
        assert!(config.data_dir.is_none());
        assert_eq!(config.status_timeout_secs, 3);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            theme_mode: ThemeMode::Ocean,
            language: Language::Japanese,
            show_help: true,
            data_dir: Some(PathBuf::from("/tmp/todos")),
            status_timeout_secs: 7,
        };

        let serialized = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(config.theme_mode, deserialized.theme_mode);
        assert_eq!(config.language, deserialized.language);
        assert_eq!(config.show_help, deserialized.show_help);
        assert_eq!(config.data_dir, deserialized.data_dir);
        assert_eq!(config.status_timeout_secs, deserialized.status_timeout_secs);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"theme_mode":"Light"}"#).unwrap();
        assert_eq!(config.theme_mode, ThemeMode::Light);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.status_timeout_secs, 3);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo-tui").join("config.json");

        let (config, warning) = Config::load_from(&path);
        assert_eq!(config.theme_mode, ThemeMode::Dark);
        assert!(warning.is_none());
        assert!(path.exists());
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let (config, warning) = Config::load_from(&path);
        assert_eq!(config.status_timeout_secs, 3);
        let warning = warning.unwrap().to_string();
        assert!(warning.starts_with("invalid config at"));

        // The broken file is left for the user to fix
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_clamps_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"status_timeout_secs":0}"#).unwrap();

        let (config, warning) = Config::load_from(&path);
        assert!(warning.is_none());
        assert_eq!(config.status_timeout_secs, 1);
    }

    #[test]
    fn test_load_reports_unwritable_default() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.json");

        let (config, warning) = Config::load_from(&path);
        assert_eq!(config.theme_mode, ThemeMode::Dark);
        assert_eq!(warning.unwrap().to_string(), "could not write default config");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.cycle_theme();
        config.cycle_language();
        config.save_to(&path).unwrap();

        let (reloaded, _) = Config::load_from(&path);
        assert_eq!(reloaded.theme_mode, ThemeMode::Light);
        assert_eq!(reloaded.language, Language::Japanese);
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/todos")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/todos"));
    }

    #[test]
    fn test_status_timeout_validation() {
        let mut config = Config::default();

        config.set_status_timeout(10);
        assert_eq!(config.status_timeout_secs, 10);

        // Invalid timeout should be rejected
        config.set_status_timeout(0);
        assert_eq!(config.status_timeout_secs, 10);

        config.status_timeout_secs = 0;
        assert_eq!(config.status_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_theme_cycle() {
        let mut config = Config::default();
        config.cycle_theme();
        assert_eq!(config.theme_mode, ThemeMode::Light);
        config.cycle_theme();
        assert_eq!(config.theme_mode, ThemeMode::Ocean);
        config.cycle_theme();
        assert_eq!(config.theme_mode, ThemeMode::Dark);
        assert_eq!(config.theme_mode.display_name(), "Dark");
    }

    #[test]
    fn test_help_toggle() {
        let mut config = Config::default();
        assert!(!config.show_help);

        config.toggle_help();
        assert!(config.show_help);

        config.toggle_help();
        assert!(!config.show_help);
    }
}

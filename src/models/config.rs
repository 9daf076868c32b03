//! Configuration types.
//!
//! Configuration is layered: `/etc/jobtrack/config.toml`, then the user
//! config file, then environment variables. Invalid values are corrected to
//! defaults with a warning unless `JOBTRACK_STRICT_CONFIG` is set, in which
//! case they are fatal.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,

    pub refresh: RefreshConfig,

    pub display: DisplayConfig,

    pub behavior: BehaviorConfig,
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the tracker backend. The collection lives at
    /// `{base_url}/jobs`.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// TUI auto-refresh interval in seconds
    pub interval: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval: 30 }
    }
}

/// Minimum allowed refresh interval in seconds (prevents tight polling loops)
const MIN_REFRESH_INTERVAL: u64 = 1;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name ("dark" or "light")
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Require confirmation before deleting applications
    pub confirm_delete: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            confirm_delete: true,
        }
    }
}

impl RefreshConfig {
    /// Validate the refresh interval.
    /// Returns warnings for invalid values that were corrected to defaults.
    /// If `strict` is true, returns Err instead of correcting.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();
        if self.interval < MIN_REFRESH_INTERVAL {
            let msg = format!(
                "refresh.interval must be at least {} second(s), got {}",
                MIN_REFRESH_INTERVAL, self.interval
            );
            if strict {
                return Err(msg);
            }
            let default = Self::default().interval;
            warnings.push(format!("{msg} - using default ({default})"));
            self.interval = default;
        }
        Ok(warnings)
    }
}

impl BackendConfig {
    /// Normalize the base URL: trim whitespace and strip trailing slashes so
    /// path joining stays predictable.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            let msg = "backend.base_url must not be empty".to_string();
            if strict {
                return Err(msg);
            }
            let default = Self::default().base_url;
            warnings.push(format!("{msg} - using default ({default})"));
            self.base_url = default;
        }
        Ok(warnings)
    }
}

impl AppConfig {
    /// Get the user config file path, respecting XDG_CONFIG_HOME
    ///
    /// Resolution order:
    /// 1. $XDG_CONFIG_HOME/jobtrack/config.toml (if XDG_CONFIG_HOME is set)
    /// 2. $HOME/.config/jobtrack/config.toml (if HOME is set)
    /// 3. dirs::config_dir()/jobtrack/config.toml (fallback using dirs crate)
    /// 4. None if no config directory can be determined
    #[must_use]
    pub fn user_config_path() -> Option<std::path::PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(std::path::PathBuf::from(xdg_config).join("jobtrack/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(std::path::PathBuf::from(home).join(".config/jobtrack/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("jobtrack/config.toml"))
    }

    /// Load configuration from files and environment.
    /// Returns the config and any warnings encountered during loading.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let strict = Self::is_strict_mode();

        Self::load_config_file(&mut config, "/etc/jobtrack/config.toml", &mut warnings);

        if let Some(user_path) = Self::user_config_path() {
            Self::load_config_file(&mut config, &user_path.to_string_lossy(), &mut warnings);
        }

        config.apply_env_overrides();

        match config.refresh.validate(strict) {
            Ok(validation_warnings) => warnings.extend(validation_warnings),
            Err(err) => {
                eprintln!("Error: {}", err);
                eprintln!("(JOBTRACK_STRICT_CONFIG is set - config errors are fatal)");
                std::process::exit(1);
            }
        }

        match config.backend.validate(strict) {
            Ok(validation_warnings) => warnings.extend(validation_warnings),
            Err(err) => {
                eprintln!("Error: {}", err);
                eprintln!("(JOBTRACK_STRICT_CONFIG is set - config errors are fatal)");
                std::process::exit(1);
            }
        }

        (config, warnings)
    }

    /// Check if strict config mode is enabled via JOBTRACK_STRICT_CONFIG
    fn is_strict_mode() -> bool {
        std::env::var("JOBTRACK_STRICT_CONFIG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Load a config file, collecting warnings on parse errors but not on
    /// missing files. In strict mode parse errors are fatal.
    fn load_config_file(config: &mut Self, path: &str, warnings: &mut Vec<String>) {
        let strict = Self::is_strict_mode();

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(parsed) => config.merge(parsed),
                Err(e) => {
                    if strict {
                        eprintln!("Error: Failed to parse config file '{}': {}", path, e);
                        eprintln!("(JOBTRACK_STRICT_CONFIG is set - config errors are fatal)");
                        std::process::exit(1);
                    }
                    warnings.push(format!("Failed to parse config file '{}': {}", path, e));
                }
            },
            Err(_) => {
                // Missing config files are fine
            }
        }
    }

    /// Later files win wholesale, section by section.
    fn merge(&mut self, other: AppConfig) {
        self.backend = other.backend;
        self.refresh = other.refresh;
        self.display = other.display;
        self.behavior = other.behavior;
    }

    fn apply_env_overrides(&mut self) {
        let strict = Self::is_strict_mode();

        if let Ok(val) = std::env::var("JOBTRACK_API_URL")
            && !val.is_empty()
        {
            self.backend.base_url = val;
        }

        if let Ok(val) = std::env::var("JOBTRACK_REFRESH") {
            match val.parse::<u64>() {
                Ok(secs) if secs >= MIN_REFRESH_INTERVAL => {
                    self.refresh.interval = secs;
                }
                Ok(_) => Self::report_env_error(
                    strict,
                    "JOBTRACK_REFRESH",
                    &val,
                    &format!("must be at least {} second(s)", MIN_REFRESH_INTERVAL),
                ),
                Err(_) => Self::report_env_error(
                    strict,
                    "JOBTRACK_REFRESH",
                    &val,
                    "expected a positive integer (seconds)",
                ),
            }
        }

        if let Ok(val) = std::env::var("JOBTRACK_THEME") {
            self.display.theme = val;
        }
        if std::env::var("JOBTRACK_NO_CONFIRM").is_ok() {
            self.behavior.confirm_delete = false;
        }
    }

    /// Report an environment variable error, exiting if strict mode is enabled
    fn report_env_error(strict: bool, var_name: &str, value: &str, reason: &str) {
        if strict {
            eprintln!("Error: Invalid value '{}' for {}: {}", value, var_name, reason);
            eprintln!("(JOBTRACK_STRICT_CONFIG is set - config errors are fatal)");
            std::process::exit(1);
        } else {
            eprintln!(
                "Warning: Invalid value '{}' for {}, {} - using default",
                value, var_name, reason
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.refresh.interval, 30);
        assert_eq!(config.display.theme, "dark");
        assert!(config.behavior.confirm_delete);
    }

    #[test]
    fn test_refresh_validate_corrects_zero() {
        let mut config = RefreshConfig { interval: 0 };
        let warnings = config.validate(false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("refresh.interval"));
        assert_eq!(config.interval, RefreshConfig::default().interval);
    }

    #[test]
    fn test_refresh_validate_strict_rejects_zero() {
        let mut config = RefreshConfig { interval: 0 };
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn test_backend_validate_strips_trailing_slash() {
        let mut config = BackendConfig {
            base_url: "http://tracker.example.com/ ".to_string(),
        };
        let warnings = config.validate(false).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.base_url, "http://tracker.example.com");
    }

    #[test]
    fn test_backend_validate_empty_falls_back() {
        let mut config = BackendConfig {
            base_url: "  ".to_string(),
        };
        let warnings = config.validate(false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.base_url, BackendConfig::default().base_url);
    }

    #[test]
    fn test_parse_partial_file_uses_section_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "http://tracker.local:9000"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.backend.base_url, "http://tracker.local:9000");
        assert_eq!(parsed.refresh.interval, RefreshConfig::default().interval);
    }

    #[test]
    fn test_merge_takes_later_sections() {
        let mut base = AppConfig::default();
        let other = AppConfig {
            backend: BackendConfig {
                base_url: "http://other".to_string(),
            },
            refresh: RefreshConfig { interval: 5 },
            ..AppConfig::default()
        };
        base.merge(other);
        assert_eq!(base.backend.base_url, "http://other");
        assert_eq!(base.refresh.interval, 5);
    }
}

//! Configuration file management.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use mylocation_core::{
    Coordinates, FixedProvider, GpsdConfig, GpsdProvider, LocationProvider, PositionOptions,
    SimulatedProvider, gpsd, simulated,
};

use crate::cli::ProviderKind;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Location database path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Preference file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PathBuf>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Position source settings
    #[serde(default)]
    pub location: LocationConfig,
}

/// `[location]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Which provider to use
    #[serde(default)]
    pub provider: ProviderKind,

    /// Seconds to wait for a fix; provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub gpsd: GpsdSection,

    #[serde(default)]
    pub fixed: PositionSection,

    #[serde(default)]
    pub simulated: SimulatedSection,
}

/// `[location.gpsd]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsdSection {
    #[serde(default = "default_gpsd_host")]
    pub host: String,
    #[serde(default = "default_gpsd_port")]
    pub port: u16,
}

impl Default for GpsdSection {
    fn default() -> Self {
        Self {
            host: default_gpsd_host(),
            port: default_gpsd_port(),
        }
    }
}

fn default_gpsd_host() -> String {
    gpsd::DEFAULT_GPSD_HOST.to_string()
}

fn default_gpsd_port() -> u16 {
    gpsd::DEFAULT_GPSD_PORT
}

/// `[location.fixed]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSection {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

/// São Paulo city centre.
const DEFAULT_LATITUDE: f64 = -23.55052;
const DEFAULT_LONGITUDE: f64 = -46.633308;

impl Default for PositionSection {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

/// `[location.simulated]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedSection {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_radius")]
    pub radius_m: f64,
}

impl Default for SimulatedSection {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            radius_m: simulated::DEFAULT_RADIUS_M,
        }
    }
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

fn default_radius() -> f64 {
    simulated::DEFAULT_RADIUS_M
}

/// Environment variable naming the location database.
pub const DATABASE_ENV: &str = "MYLOCATION_DB";

/// Database path from the environment, for front ends without clap.
pub fn database_from_env() -> Option<PathBuf> {
    database_from_env_value(std::env::var_os(DATABASE_ENV))
}

/// An empty value counts as unset.
fn database_from_env_value(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(mylocation_store::APP_DIR)
            .join("config.toml")
    }

    /// Path in use: the explicit one, else the default.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map(Path::to_path_buf).unwrap_or_else(Self::default_path)
    }

    /// Load config from file, or return default if missing or invalid.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = Self::resolve_path(explicit);
        if !path.exists() {
            return Self::default();
        }
        match Self::read(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring configuration file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = self.to_toml()?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Database path: flag or env, then config, then the platform default.
    pub fn resolve_database(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.or_else(|| self.database.clone())
            .unwrap_or_else(mylocation_store::default_db_path)
    }

    /// Preference file path: flag, then config, then the platform default.
    pub fn resolve_preferences(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.or_else(|| self.preferences.clone())
            .unwrap_or_else(mylocation_store::default_prefs_path)
    }

    /// Fix timeout: flag, then config, then none (provider default).
    pub fn position_options(&self, timeout_arg: Option<u64>) -> PositionOptions {
        PositionOptions {
            timeout: timeout_arg
                .or(self.location.timeout_secs)
                .map(Duration::from_secs),
        }
    }

    /// Build the configured provider, or `kind` when given.
    pub fn build_provider(&self, kind: Option<ProviderKind>) -> Result<Arc<dyn LocationProvider>> {
        let kind = kind.unwrap_or(self.location.provider);
        let provider: Arc<dyn LocationProvider> = match kind {
            ProviderKind::Gpsd => {
                let section = &self.location.gpsd;
                Arc::new(GpsdProvider::new(GpsdConfig {
                    host: section.host.clone(),
                    port: section.port,
                    ..GpsdConfig::default()
                }))
            }
            ProviderKind::Fixed => {
                let section = self.location.fixed;
                let position = Coordinates::new(section.latitude, section.longitude)
                    .context("Invalid [location.fixed] position")?;
                Arc::new(FixedProvider::new(position))
            }
            ProviderKind::Simulated => {
                let section = self.location.simulated;
                let base = Coordinates::new(section.latitude, section.longitude)
                    .context("Invalid [location.simulated] position")?;
                Arc::new(
                    SimulatedProvider::new(base, section.radius_m)
                        .context("Invalid [location.simulated] settings")?,
                )
            }
        };
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.location.provider, ProviderKind::Gpsd);
        assert_eq!(config.location.gpsd.port, 2947);
        assert!(!config.no_color);
    }

    #[test]
    fn test_parse_full_file() {
        let content = r#"
            database = "/data/locations.db"
            no_color = true

            [location]
            provider = "simulated"
            timeout_secs = 10

            [location.gpsd]
            host = "gps.local"
            port = 3000

            [location.simulated]
            latitude = 48.8584
            longitude = 2.2945
            radius_m = 50.0
        "#;
        let config: Config = toml::from_str(content).unwrap();

        assert_eq!(config.database, Some(PathBuf::from("/data/locations.db")));
        assert!(config.no_color);
        assert_eq!(config.location.provider, ProviderKind::Simulated);
        assert_eq!(config.location.timeout_secs, Some(10));
        assert_eq!(config.location.gpsd.host, "gps.local");
        assert_eq!(config.location.simulated.radius_m, 50.0);
        // Missing section falls back to defaults.
        assert_eq!(config.location.fixed, PositionSection::default());
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let config: Config = toml::from_str("[location.gpsd]\nport = 4000\n").unwrap();
        assert_eq!(config.location.gpsd.host, "localhost");
        assert_eq!(config.location.gpsd.port, 4000);
    }

    #[test]
    fn test_save_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.location.provider = ProviderKind::Fixed;
        config.location.timeout_secs = Some(15);
        config.save(&path).unwrap();

        assert_eq!(Config::read(&path).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "location = 5").unwrap();

        assert!(Config::read(&path).is_err());
        assert_eq!(Config::load(Some(path.as_path())), Config::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            Config::load(Some(dir.path().join("absent.toml").as_path())),
            Config::default()
        );
    }

    #[test]
    fn test_partial_fixed_section_keeps_other_settings() {
        let config: Config = toml::from_str(
            "no_color = true\n[location]\nprovider = \"fixed\"\n[location.fixed]\nlatitude = 48.8584\n",
        )
        .unwrap();
        assert!(config.no_color);
        assert_eq!(config.location.provider, ProviderKind::Fixed);
        assert_eq!(config.location.fixed.latitude, 48.8584);
        assert_eq!(config.location.fixed.longitude, DEFAULT_LONGITUDE);
    }

    #[test]
    fn test_database_from_env_value() {
        assert_eq!(
            database_from_env_value(Some(OsString::from("/env.db"))),
            Some(PathBuf::from("/env.db"))
        );
        assert_eq!(database_from_env_value(Some(OsString::new())), None);
        assert_eq!(database_from_env_value(None), None);

        let config = Config {
            database: Some(PathBuf::from("/config.db")),
            ..Default::default()
        };
        let from_env = database_from_env_value(Some(OsString::from("/env.db")));
        assert_eq!(config.resolve_database(from_env), PathBuf::from("/env.db"));
    }

    #[test]
    fn test_resolve_database_precedence() {
        let config = Config {
            database: Some(PathBuf::from("/config.db")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_database(Some(PathBuf::from("/arg.db"))),
            PathBuf::from("/arg.db")
        );
        assert_eq!(config.resolve_database(None), PathBuf::from("/config.db"));
        assert_eq!(
            Config::default().resolve_database(None),
            mylocation_store::default_db_path()
        );
    }

    #[test]
    fn test_position_options_precedence() {
        let mut config = Config::default();
        assert_eq!(config.position_options(None).timeout, None);

        config.location.timeout_secs = Some(20);
        assert_eq!(
            config.position_options(None).timeout,
            Some(Duration::from_secs(20))
        );
        assert_eq!(
            config.position_options(Some(3)).timeout,
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_build_provider() {
        let config = Config::default();
        assert_eq!(config.build_provider(None).unwrap().name(), "gpsd");
        assert_eq!(
            config
                .build_provider(Some(ProviderKind::Fixed))
                .unwrap()
                .name(),
            "fixed"
        );
        assert_eq!(
            config
                .build_provider(Some(ProviderKind::Simulated))
                .unwrap()
                .name(),
            "simulated"
        );
    }

    #[test]
    fn test_build_provider_rejects_bad_position() {
        let mut config = Config::default();
        config.location.fixed.latitude = 123.0;
        assert!(config.build_provider(Some(ProviderKind::Fixed)).is_err());
    }
}

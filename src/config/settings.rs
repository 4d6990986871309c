use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::BackendKind;
use crate::ledger::{LedgerSettings, DEFAULT_SEED, DEFAULT_STORAGE_KEY};
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Currency prefix used when none is configured
const DEFAULT_CURRENCY: &str = "Rp";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend holding the ledger
    pub backend: BackendKind,
    /// Key the member collection is stored under
    pub storage_key: String,
    /// Members created when nothing usable is stored
    pub seed_members: Vec<String>,
    /// Prefix shown before amounts
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_members: DEFAULT_SEED.iter().map(|s| s.to_string()).collect(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlStorageConfig {
    pub backend: Option<BackendKind>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlSeedConfig {
    pub members: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlDisplayConfig {
    pub currency: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<TomlStorageConfig>,
    pub seed: Option<TomlSeedConfig>,
    pub display: Option<TomlDisplayConfig>,
}

/// Storage keys double as file names for the JSON backend
fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Config {
    /// Load configuration from the default location, merging with defaults
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load configuration from `config_file`, creating it from the bundled
    /// example on first run. Unreadable or invalid files leave the defaults.
    pub fn load_from(config_file: &Path) -> Self {
        let mut config = Config::default();

        if !config_file.exists() {
            Self::create_default_config(config_file);
        }

        let contents = match fs::read_to_string(config_file) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %config_file.display(), error = %e, "No config file");
                return config;
            }
        };

        match toml::from_str::<TomlConfig>(&contents) {
            Ok(toml_config) => config.merge(toml_config),
            Err(e) => {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Invalid config file, using defaults"
                );
            }
        }

        config
    }

    /// Overlay values present in `toml_config`
    pub fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(storage) = toml_config.storage {
            if let Some(backend) = storage.backend {
                self.backend = backend;
            }
            if let Some(key) = storage.key {
                if is_valid_storage_key(&key) {
                    self.storage_key = key;
                } else {
                    tracing::warn!(key = %key, "Ignoring invalid storage key");
                }
            }
        }

        if let Some(members) = toml_config.seed.and_then(|seed| seed.members) {
            self.seed_members = members;
        }

        if let Some(currency) = toml_config.display.and_then(|display| display.currency) {
            self.currency = currency;
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Ledger settings derived from this configuration
    pub fn ledger_settings(&self) -> LedgerSettings {
        LedgerSettings {
            key: self.storage_key.clone(),
            seed: self.seed_members.clone(),
        }
    }
}

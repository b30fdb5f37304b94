//! Configuration for the language factory.
//!
//! Settings are layered:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Config File
//!
//! `LF_CONFIG` names the file explicitly; otherwise `language-factory.toml`
//! in the current directory is used when present.
//!
//! ```toml
//! default_language = "fr-FR"
//! language_directory = "resources/language"
//!
//! [logging]
//! default = "warn"
//!
//! [logging.modules]
//! factory = "debug"
//! ```
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `LF_` and use double underscores
//! to separate nested levels:
//! - `LF_DEFAULT_LANGUAGE=de-DE` sets `default_language`
//! - `LF_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory when `LF_CONFIG` is unset.
pub const CONFIG_FILE_NAME: &str = "language-factory.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "LF_CONFIG";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Language used when a caller does not name one
    #[serde(
        default = "default_language",
        deserialize_with = "deserialize_identifier"
    )]
    pub default_language: String,

    /// Base directory of the language folders
    #[serde(default = "default_language_directory")]
    pub language_directory: PathBuf,

    /// Debug flag handed to language resources built through `LanguageFactory::language`
    #[serde(default)]
    pub debug: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for all targets
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target level overrides, e.g. `factory = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_language() -> String {
    "en-GB".to_string()
}
fn default_language_directory() -> PathBuf {
    PathBuf::from("language")
}
fn default_log_level() -> String {
    "warn".to_string()
}

/// Accept any scalar as an identifier.
///
/// Env values are typed by figment, so `LF_DEFAULT_LANGUAGE=1033` arrives
/// as an integer; identifiers are never validated, only stringified.
fn deserialize_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdentifierVisitor;

    impl Visitor<'_> for IdentifierVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a language identifier")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdentifierVisitor)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            language_directory: default_language_directory(),
            debug: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honouring `LF_` overrides.
    ///
    /// A missing file is not an error; defaults and environment apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::file_figment(path.as_ref())
            // Double underscore separates nested levels, single underscore stays
            .merge(
                Env::prefixed("LF_")
                    .ignore(&["CONFIG"])
                    .map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
            .extract()
            .map_err(Box::new)
    }

    /// Defaults layered with the TOML file only.
    fn file_figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;

use crate::domain::models::BackendName;
use crate::domain::models::Language;
use crate::domain::models::StoreName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

const ENV_PREFIX: &str = "COMPILOT_";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Backend,
    BackendHealthCheckTimeout,
    CompilerURL,
    ConfigFile,
    GeminiToken,
    GeminiURL,
    Language,
    Model,
    OllamaURL,
    RequestTimeout,
    Store,
    StoreFile,
    Temperature,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("compilot/config.toml");
        let store_path = dirs::cache_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("compilot/store.yaml");

        let default_backend = BackendName::Gemini.to_string();
        let default_language = Language::default().to_string();
        let default_store = StoreName::File.to_string();

        let res: &str = match key {
            ConfigKey::Backend => &default_backend,
            ConfigKey::BackendHealthCheckTimeout => "1000",
            ConfigKey::CompilerURL => "http://localhost:4000",
            ConfigKey::GeminiToken => "",
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com",
            ConfigKey::Language => &default_language,
            ConfigKey::Model => "",
            ConfigKey::OllamaURL => "http://localhost:11434",
            ConfigKey::RequestTimeout => "",
            ConfigKey::Store => &default_store,
            ConfigKey::Temperature => "0.7",

            // Paths
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::StoreFile => return store_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    fn description(key: ConfigKey) -> &'static str {
        match key {
            ConfigKey::Backend => return "Backend answering AI assist requests.",
            ConfigKey::BackendHealthCheckTimeout => {
                return "Time to wait in milliseconds before timing out when doing a healthcheck for a backend."
            }
            ConfigKey::CompilerURL => return "Base URL of the code execution service.",
            ConfigKey::ConfigFile => return "Path to this configuration file.",
            ConfigKey::GeminiToken => return "Gemini API token when using the Gemini backend.",
            ConfigKey::GeminiURL => return "Gemini API URL when using the Gemini backend.",
            ConfigKey::Language => return "Language selected when a session starts.",
            ConfigKey::Model => {
                return "Model used by the assist backend. Defaults to a model suited to the backend."
            }
            ConfigKey::OllamaURL => return "Ollama API URL when using the Ollama backend.",
            ConfigKey::RequestTimeout => {
                return "Time to wait in milliseconds for the execution service. Empty leaves it to the transport."
            }
            ConfigKey::Store => return "Where the code buffer is persisted between sessions.",
            ConfigKey::StoreFile => return "Path of the file used by the file store.",
            ConfigKey::Temperature => return "Sampling temperature for assist requests.",
        }
    }

    fn possible_values(key: ConfigKey) -> &'static [&'static str] {
        match key {
            ConfigKey::Backend => return BackendName::VARIANTS,
            ConfigKey::Language => return Language::VARIANTS,
            ConfigKey::Store => return StoreName::VARIANTS,
            _ => return &[],
        }
    }

    /// Environment variable overriding the key, e.g. `COMPILOT_COMPILER_URL`.
    pub fn env_name(key: ConfigKey) -> String {
        return format!(
            "{ENV_PREFIX}{}",
            key.to_string().to_uppercase().replace('-', "_")
        );
    }

    pub fn validate(key: ConfigKey, val: &str) -> Result<()> {
        let possible_values = Config::possible_values(key);
        if !possible_values.is_empty() && !possible_values.contains(&val) {
            bail!(format!(
                "Invalid value for key '{key}': {val}\nPossible values are: {}",
                possible_values.join(", ")
            ));
        }

        let is_millis = key == ConfigKey::BackendHealthCheckTimeout || key == ConfigKey::RequestTimeout;
        if is_millis && !val.is_empty() && val.parse::<u64>().is_err() {
            bail!(format!("Invalid value for key '{key}': {val} is not a number of milliseconds"));
        }

        if key == ConfigKey::Temperature && val.parse::<f32>().is_err() {
            bail!(format!("Invalid value for key '{key}': {val} is not a number"));
        }

        return Ok(());
    }

    /// Reads every known key out of a TOML document. Empty strings are skipped.
    pub fn parse_document(toml_str: &str) -> Result<Vec<(ConfigKey, String)>> {
        let doc = toml_str.parse::<toml_edit::Document>()?;
        let mut values = vec![];

        for key in ConfigKey::iter() {
            if let Some(val) = doc.get(&key.to_string()) {
                let val_str = if let Some(val_int) = val.as_integer() {
                    val_int.to_string()
                } else if let Some(val_float) = val.as_float() {
                    val_float.to_string()
                } else if let Some(val_str) = val.as_str() {
                    val_str.to_string()
                } else {
                    bail!(format!("config.toml has an unsupported type for key '{key}'"));
                };

                if val_str.is_empty() {
                    continue;
                }

                if let Err(err) = Config::validate(key, &val_str) {
                    bail!(format!("config.toml: {err}"));
                }
                values.push((key, val_str));
            }
        }

        return Ok(values);
    }

    /// Loads defaults, then the config file, then `COMPILOT_*` environment
    /// variables. A missing config file is not an error. Nothing is applied
    /// unless every source is valid.
    pub async fn load(config_file: Option<&path::Path>) -> Result<()> {
        let mut values = ConfigKey::iter()
            .map(|key| return (key, Config::default(key)))
            .collect::<Vec<(ConfigKey, String)>>();

        let config_path = match config_file {
            Some(config_file) => config_file.to_path_buf(),
            None => path::PathBuf::from(Config::default(ConfigKey::ConfigFile)),
        };
        values.push((
            ConfigKey::ConfigFile,
            config_path.to_string_lossy().to_string(),
        ));

        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            values.extend(Config::parse_document(&toml_str)?);
        }

        for key in ConfigKey::iter() {
            if let Ok(val) = env::var(Config::env_name(key)) {
                if val.is_empty() {
                    continue;
                }
                Config::validate(key, &val)?;
                values.push((key, val));
            }
        }

        for (key, val) in values {
            Config::set(key, &val);
        }

        tracing::debug!(
            backend = Config::get(ConfigKey::Backend),
            model = Config::get(ConfigKey::Model),
            compiler_url = Config::get(ConfigKey::CompilerURL),
            language = Config::get(ConfigKey::Language),
            store = Config::get(ConfigKey::Store),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default() -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let mut description = Config::description(key).to_string();
                let possible_values = Config::possible_values(key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() || val.parse::<f64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{}\"", val.replace('\\', "\\\\"));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}

use crate::domain::error::DocError;
use crate::domain::model::{Endpoint, EndpointTier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    #[serde(default)]
    pub free_api: bool,
    pub base_url: Option<String>,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_formality_supported")]
    pub formality_supported: bool,
    #[serde(default)]
    pub polling: Polling,
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Polling {
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Http {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub proxy: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Polling {
    fn default() -> Self {
        Self {
            min_interval_secs: default_min_interval_secs(),
            max_wait_secs: default_max_wait_secs(),
            max_polls: default_max_polls(),
        }
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            proxy: None,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            free_api: false,
            base_url: None,
            target_lang: default_target_lang(),
            formality_supported: true,
            polling: Polling::default(),
            http: Http::default(),
            logging: Logging::default(),
        }
    }
}

impl Config {
    pub fn tier(&self) -> EndpointTier {
        if self.free_api {
            EndpointTier::Free
        } else {
            EndpointTier::Standard
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.tier(), self.base_url.as_deref())
    }

    /// The configured API key, rejecting blank values.
    pub fn require_api_key(&self) -> Result<&str, DocError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                DocError::InvalidInput(
                    "Specify a DeepL API key as DEEPL_API_KEY environment variable, or using the --key or -k parameter."
                        .to_string(),
                )
            })
    }
}

impl Polling {
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_secs.max(1))
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }
}

// Defaults
fn default_target_lang() -> String {
    "EN".to_string()
}
fn default_formality_supported() -> bool {
    true
}
fn default_min_interval_secs() -> u64 {
    1
}
fn default_max_wait_secs() -> u64 {
    3600
}
fn default_max_polls() -> u32 {
    1000
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_user_agent() -> String {
    format!("deepl-doc/{}", env!("CARGO_PKG_VERSION"))
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("deepl-doc").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, DocError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn load_config() -> Result<Config, DocError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), DocError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| DocError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| DocError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(DocError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{FinanceError, Result};

const DEFAULT_DIR_NAME: &str = ".finance_hub";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const HOME_ENV: &str = "FINANCE_HUB_HOME";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Full URL; takes priority over the individual parts below when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            host: "localhost".into(),
            port: 3000,
            protocol: "http".into(),
            timeout_ms: 30_000,
        }
    }
}

impl ApiConfig {
    /// Resolves the backend URL, omitting default ports.
    pub fn api_url(&self) -> String {
        if let Some(explicit) = self.base_url.as_deref().map(str::trim) {
            if !explicit.is_empty() {
                return explicit.to_string();
            }
        }
        let standard_port = matches!(
            (self.protocol.as_str(), self.port),
            ("http", 80) | ("https", 443)
        );
        if standard_port {
            format!("{}://{}", self.protocol, self.host)
        } else {
            format!("{}://{}:{}", self.protocol, self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Finance Hub".into(),
            version: "1.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: String,
    pub balance_history_points: usize,
    pub top_categories: usize,
    pub expense_color: String,
    pub income_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            balance_history_points: 12,
            top_categories: 5,
            expense_color: "#ef4444".into(),
            income_color: "#10b981".into(),
        }
    }
}

impl Config {
    /// Applies `FINANCE_HUB_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FINANCE_HUB_API_BASE_URL") {
            self.api.base_url = Some(url);
        }
        if let Some(host) = lookup("FINANCE_HUB_API_HOST") {
            self.api.host = host;
        }
        if let Some(protocol) = lookup("FINANCE_HUB_API_PROTOCOL") {
            self.api.protocol = protocol;
        }
        if let Some(port) = lookup("FINANCE_HUB_API_PORT") {
            self.api.port = parse_override("FINANCE_HUB_API_PORT", &port)?;
        }
        if let Some(timeout) = lookup("FINANCE_HUB_API_TIMEOUT_MS") {
            self.api.timeout_ms = parse_override("FINANCE_HUB_API_TIMEOUT_MS", &timeout)?;
        }
        if let Some(token) = lookup("FINANCE_HUB_AUTH_TOKEN") {
            self.auth.token = Some(token);
        }
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| FinanceError::Config(format!("{key} has invalid value `{raw}`")))
}

/// Returns the application data directory, defaulting to `~/.finance_hub`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    /// Reads the stored configuration, falling back to defaults when absent.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            FinanceError::Config(format!("{} is not valid: {err}", self.path.display()))
        })
    }

    /// Stored configuration with environment overrides applied.
    pub fn load_effective(&self) -> Result<Config> {
        let mut config = self.load()?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const BASE_URL_ENV: &str = "OPSCONSOLE_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    pub base_url: Option<String>,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerSettings {
    pub port: Option<u16>,
    pub seed: Option<PathBuf>,
}

impl ConsoleConfig {
    /// Pick the backend base URL: explicit flag, then environment, then the
    /// config file, then the built-in default.
    pub fn resolve_base_url(&self, flag: Option<&str>, env: Option<&str>) -> String {
        [flag, env, self.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    pub fn server_port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.server.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn seed_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf).or_else(|| self.server.seed.clone())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("opsconsole.toml")
}

pub fn base_url_from_env() -> Option<String> {
    std::env::var(BASE_URL_ENV).ok()
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ConsoleConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ConsoleConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

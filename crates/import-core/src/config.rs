use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:19980";
pub const DEFAULT_HEADING: &str = "Admin Page";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_BASE: &str = "IMPORT_ADMIN_API";
pub const ENV_HOST_OVERRIDE: &str = "IMPORT_ADMIN_HOST";
pub const ENV_PREFIX: &str = "IMPORT_ADMIN_PREFIX";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub api_base: String,
    pub host_override: Option<String>,
    pub heading: String,
    pub default_prefix: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            host_override: None,
            heading: DEFAULT_HEADING.to_string(),
            default_prefix: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AdminConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).context("read config")?;
        let config = serde_json::from_str(&data).context("parse config")?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create config directory")?;
        }
        let data = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, data).context("write config")?;
        Ok(())
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Non-empty values from `lookup` replace what the file said.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(api) = get(ENV_API_BASE) {
            self.api_base = api;
        }
        if let Some(host) = get(ENV_HOST_OVERRIDE) {
            self.host_override = Some(host);
        }
        if let Some(prefix) = get(ENV_PREFIX) {
            self.default_prefix = Some(prefix);
        }
    }
}

fn project_dirs() -> anyhow::Result<ProjectDirs> {
    ProjectDirs::from("com", "import-admin", "import-admin").context("resolve project dirs")
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

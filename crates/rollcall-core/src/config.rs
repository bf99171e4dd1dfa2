//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which holds the backend URL and the last login ids used on this machine.
//!
//! Configuration is stored at `~/.config/rollcall/config.json`. The backend
//! URL can be overridden with the `ROLLCALL_BACKEND_URL` environment variable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// Application name used for config/log directory paths
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured backend URL
pub const BACKEND_URL_ENV: &str = "ROLLCALL_BACKEND_URL";

/// Environment variables that pre-fill the login forms
pub const ADMIN_ID_ENV: &str = "ROLLCALL_ADMIN_ID";
pub const STUDENT_ID_ENV: &str = "ROLLCALL_STUDENT_ID";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub last_admin_id: Option<String>,
    pub last_student_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(serde_json::from_str(&contents).context("Failed to parse config file")?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> Result<PathBuf> {
        let base = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(base.join(APP_NAME).join("logs"))
    }

    /// Resolve the backend base URL: environment first, then the config file.
    pub fn backend_url(&self) -> Result<String> {
        let env_value = std::env::var(BACKEND_URL_ENV).ok();
        Self::pick_backend_url(env_value.as_deref(), self.backend_url.as_deref())
    }

    /// Id to pre-fill on the login form: environment first, then the last
    /// id that logged in successfully.
    pub fn login_prefill(&self, role: Role) -> Option<String> {
        let (env_name, last) = match role {
            Role::Admin => (ADMIN_ID_ENV, &self.last_admin_id),
            Role::Student => (STUDENT_ID_ENV, &self.last_student_id),
        };
        std::env::var(env_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| last.clone())
    }

    pub fn remember_login(&mut self, role: Role, id: &str) {
        let slot = match role {
            Role::Admin => &mut self.last_admin_id,
            Role::Student => &mut self.last_student_id,
        };
        *slot = Some(id.to_string());
    }

    fn pick_backend_url(env_value: Option<&str>, configured: Option<&str>) -> Result<String> {
        let raw = env_value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| configured.map(str::trim).filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No backend URL configured. Set {} or backend_url in the config file.",
                    BACKEND_URL_ENV
                )
            })?;

        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            anyhow::bail!("Backend URL must start with http:// or https://: {}", raw);
        }
        Ok(raw.trim_end_matches('/').to_string())
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::engine::DEFAULT_ITEMS_PER_PAGE;
use crate::usecase::services::access::DEFAULT_ALLOWED_DOMAINS;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "salesops", "salesdash")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub items_per_page: usize,
    /// Report opened at start-up.
    pub report_path: Option<PathBuf>,
    /// Identity checked against `allowed_domains`.
    pub user_email: Option<String>,
    pub allowed_domains: Vec<String>,
    pub log_filter: String,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            report_path: None,
            user_email: None,
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|domain| domain.to_string())
                .collect(),
            log_filter: "info".to_string(),
            window_title: "Sales Ops Dashboard".to_string(),
        }
    }
}

impl AppConfig {
    /// Missing file means defaults; a file that does not parse is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use storage::{StoreConfig, DEFAULT_LEADS_TABLE};
use url::Url;

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub store_url: Option<String>,
    pub store_service_key: Option<String>,
    pub store_table: String,
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8443".into(),
            store_url: None,
            store_service_key: None,
            store_table: DEFAULT_LEADS_TABLE.into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Settings {
    /// Backing store connection, or `None` while the URL or key is unset.
    pub fn store_config(&self) -> anyhow::Result<Option<StoreConfig>> {
        let (Some(base_url), Some(service_key)) = (
            non_empty(self.store_url.as_deref()),
            non_empty(self.store_service_key.as_deref()),
        ) else {
            return Ok(None);
        };

        let parsed = Url::parse(base_url)
            .with_context(|| format!("invalid store url '{base_url}'"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("store url '{base_url}' must use http or https");
        }

        Ok(Some(StoreConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            table: self.store_table.clone(),
        }))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("store_url") {
        settings.store_url = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("store_service_key") {
        settings.store_service_key = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("store_table") {
        settings.store_table = v.clone();
    }
    if let Some(v) = file_cfg.get("cors_origins") {
        settings.cors_origins = split_origins(v);
    }
    if let Some(v) = file_cfg.get("max_body_bytes") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }
}

/// The `APP__` spelling wins over the short one when both are set.
pub fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("STORE_URL") {
        settings.store_url = Some(v);
    }
    if let Some(v) = var("APP__STORE_URL") {
        settings.store_url = Some(v);
    }

    if let Some(v) = var("STORE_SERVICE_KEY") {
        settings.store_service_key = Some(v);
    }
    if let Some(v) = var("APP__STORE_SERVICE_KEY") {
        settings.store_service_key = Some(v);
    }

    if let Some(v) = var("STORE_TABLE") {
        settings.store_table = v;
    }
    if let Some(v) = var("APP__STORE_TABLE") {
        settings.store_table = v;
    }

    if let Some(v) = var("CORS_ORIGINS") {
        settings.cors_origins = split_origins(&v);
    }
    if let Some(v) = var("APP__CORS_ORIGINS") {
        settings.cors_origins = split_origins(&v);
    }

    if let Some(v) = var("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Base URL baked in at build time; `CATALOG_SERVICE_URL` overrides it when compiling.
pub const DEFAULT_SERVICE_URL: &str = match option_env!("CATALOG_SERVICE_URL") {
    Some(url) => url,
    None => "http://localhost:8080/integrales-market/api/products",
};

pub const SETTINGS_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceSettings {
    pub service_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid service url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("service url '{url}' must use http or https, got '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("service url '{url}' cannot carry path segments")]
    NotABase { url: String },
}

impl ServiceSettings {
    /// Parses and checks the configured base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.service_url.trim();
        let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                url: raw.to_string(),
                scheme: url.scheme().to_string(),
            });
        }
        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABase {
                url: raw.to_string(),
            });
        }

        Ok(url)
    }

    /// `None` leaves timeouts to the transport defaults.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

pub fn load_settings() -> ServiceSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ServiceSettings {
    let mut settings = ServiceSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, env);

    settings
}

fn apply_file_overrides(settings: &mut ServiceSettings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("ignoring unparseable {SETTINGS_FILE}");
        return;
    };

    if let Some(v) = file_cfg.get("service_url").and_then(toml::Value::as_str) {
        settings.service_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(toml::Value::as_integer)
    {
        settings.request_timeout_secs = u64::try_from(v).ok();
    }
}

fn apply_env_overrides(settings: &mut ServiceSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("CATALOG_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }
}

use std::net::SocketAddr;

use serde::Deserialize;
use promtext_core::error::{PromTextError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub prometheus: PrometheusSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromTextError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.app.name()?;
        self.server.listen_addr()?;
        self.prometheus.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default)]
    pub name: Option<String>,
}

impl AppSection {
    /// Application name stamped on every sample as `app_name`.
    pub fn name(&self) -> Result<&str> {
        match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => Ok(n),
            _ => Err(PromTextError::MissingConfig("app.name")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            PromTextError::BadConfig(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9100".into()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PrometheusSection {
    /// Path prefix mounted in front of `/metrics` (e.g. `/ops`).
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl PrometheusSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(p) = &self.endpoint {
            if !p.starts_with('/') || p.ends_with('/') {
                return Err(PromTextError::BadConfig(format!(
                    "prometheus.endpoint must start with '/' and not end with '/': {p}"
                )));
            }
        }
        Ok(())
    }

    /// Full route of the scrape endpoint.
    pub fn metrics_path(&self) -> String {
        format!("{}/metrics", self.endpoint.as_deref().unwrap_or(""))
    }
}

use anyhow::{Context, Result, bail};
use std::env;

/// Where notes are persisted
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Spanner(SpannerConfig),
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("{} environment variable is required", key))
        };

        let store = match lookup("NOTES_STORE").as_deref().unwrap_or("spanner") {
            "spanner" => StoreConfig::Spanner(SpannerConfig {
                emulator_host: lookup("SPANNER_EMULATOR_HOST"),
                project: required("SPANNER_PROJECT")?,
                instance: required("SPANNER_INSTANCE")?,
                database: required("SPANNER_DATABASE")?,
            }),
            "memory" => StoreConfig::Memory,
            other => bail!("NOTES_STORE must be 'spanner' or 'memory', got '{}'", other),
        };

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            store,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.store {
            StoreConfig::Spanner(spanner) => {
                tracing::info!("  Store: Spanner");
                tracing::info!(
                    "  Spanner emulator: {}",
                    spanner
                        .emulator_host
                        .as_deref()
                        .unwrap_or("disabled (using production)")
                );
                tracing::info!("  Spanner database: {}", spanner.database_path());
            }
            StoreConfig::Memory => {
                tracing::info!("  Store: in-memory (notes are lost on shutdown)");
            }
        }
        tracing::info!(
            "  Service listening on: {}:{}",
            self.service_host,
            self.service_port
        );
    }
}

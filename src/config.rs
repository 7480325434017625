use std::env;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};

use crate::faults::{MAX_ERROR_PERCENTAGE, MIN_ERROR_PERCENTAGE};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub error_percentage: u8,
    pub routes_file: Option<PathBuf>,
    pub max_body_bytes: usize,
}

pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self> {
        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let error_percentage = env::var("ERROR_PERCENTAGE")
            .unwrap_or_else(|_| "50".to_string())
            .parse::<u8>()
            .context("ERROR_PERCENTAGE must be an integer between 1 and 99")?;
        if !(MIN_ERROR_PERCENTAGE..=MAX_ERROR_PERCENTAGE).contains(&error_percentage) {
            bail!("ERROR_PERCENTAGE must be an integer between 1 and 99, got {}", error_percentage);
        }

        let routes_file = env::var("ROUTES_FILE").ok().map(PathBuf::from);

        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(value) => value
                .parse::<usize>()
                .context("MAX_BODY_BYTES must be a non-negative integer")?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Config {
            service_port,
            service_host,
            error_percentage,
            routes_file,
            max_body_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Error percentage: {}%", self.error_percentage);
        tracing::info!("  Routes file: {}",
            self.routes_file.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "none".to_string()));
        tracing::info!("  Max request body: {} bytes", self.max_body_bytes);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_port: 8080,
            service_host: "0.0.0.0".to_string(),
            error_percentage: 50,
            routes_file: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

use crate::clients::transport::normalize_base;
use anyhow::{Context, Result, bail};
use config::{Environment, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_PREFIX: &str = "POST_BOARD";
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub environment: String,
    pub log_level: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Defaults overlaid with `POST_BOARD_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::load(Self::environment())
    }

    pub(crate) fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).try_parsing(true)
    }

    pub(crate) fn load(env: Environment) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(env)
            .build()
            .context("Failed to read configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("environment", "development")?
            .set_default("log_level", "info")?)
    }

    fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url cannot be empty");
        }
        normalize_base(&self.api_base_url).context("api_base_url is not usable")?;
        if self.request_timeout_secs == Some(0) {
            bail!("request_timeout_secs must be greater than 0");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

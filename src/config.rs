//! Predictor selection.
//!
//! Reads `VEHICLE_PRICE_BACKEND` (`demo` or `remote`), `VEHICLE_PRICE_API_URL`
//! and `VEHICLE_PRICE_DEMO_DELAY_MS`, after loading a `.env` file if present.

use std::{env, str::FromStr, sync::Arc, time::Duration};

use thiserror::Error;

use crate::infra::{
    api::{ApiClientError, PredictionApiClient, DEFAULT_BASE_URL},
    predictor::{DemoPredictor, PricePredictor, DEFAULT_DEMO_DELAY},
};

pub const BACKEND_VAR: &str = "VEHICLE_PRICE_BACKEND";
pub const API_URL_VAR: &str = "VEHICLE_PRICE_API_URL";
pub const DEMO_DELAY_VAR: &str = "VEHICLE_PRICE_DEMO_DELAY_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid VEHICLE_PRICE_API_URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unknown predictor backend: {0} (expected demo or remote)")]
    UnknownBackend(String),
    #[error("invalid VEHICLE_PRICE_DEMO_DELAY_MS: {0}")]
    InvalidDelay(String),
    #[error(transparent)]
    Client(#[from] ApiClientError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Demo,
    Remote,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "demo" | "mock" => Ok(Backend::Demo),
            "remote" | "api" => Ok(Backend::Remote),
            _ => Err(ConfigError::UnknownBackend(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PredictorConfig {
    pub backend: Backend,
    /// Root of the prediction service; always a parseable URL.
    pub base_url: String,
    pub demo_delay: Duration,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            demo_delay: DEFAULT_DEMO_DELAY,
        }
    }
}

impl PredictorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = read(BACKEND_VAR) {
            config.backend = raw.parse()?;
        }
        if let Some(raw) = read(API_URL_VAR) {
            let url = url::Url::parse(raw.trim())?;
            config.base_url = url.to_string();
        }
        if let Some(raw) = read(DEMO_DELAY_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDelay(raw.clone()))?;
            config.demo_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn build_predictor(&self) -> Result<Arc<dyn PricePredictor>, ConfigError> {
        let predictor: Arc<dyn PricePredictor> = match self.backend {
            Backend::Demo => Arc::new(DemoPredictor::new(self.demo_delay)),
            Backend::Remote => Arc::new(PredictionApiClient::with_base_url(&self.base_url)?),
        };
        tracing::info!(backend = predictor.name(), "price predictor ready");
        Ok(predictor)
    }
}

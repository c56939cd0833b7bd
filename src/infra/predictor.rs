use std::time::Duration;

use async_trait::async_trait;

use super::api::{ApiClientError, PredictionApiClient};
use crate::domain::{estimate_price, PredictionResult, VehicleRecord};

/// Latency the demo path simulates before answering.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(1500);

/// Something that can price a validated vehicle record.
#[async_trait]
pub trait PricePredictor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn predict(&self, record: &VehicleRecord) -> Result<PredictionResult, ApiClientError>;
}

/// Offline stand-in for the prediction service, backed by the placeholder
/// formula in [`crate::domain::estimation`].
#[derive(Clone, Debug)]
pub struct DemoPredictor {
    delay: Duration,
}

impl DemoPredictor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for DemoPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_DELAY)
    }
}

#[async_trait]
impl PricePredictor for DemoPredictor {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn predict(&self, record: &VehicleRecord) -> Result<PredictionResult, ApiClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(estimate_price(record))
    }
}

#[async_trait]
impl PricePredictor for PredictionApiClient {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn predict(&self, record: &VehicleRecord) -> Result<PredictionResult, ApiClientError> {
        PredictionApiClient::predict(self, record).await
    }
}

//! Thin asynchronous client for the vehicle price prediction service.
//!
//! - `POST /predict` turns a vehicle record into a price and model metrics.
//! - `POST /feedback` reports whether a prediction was accurate.
//! - `GET /model-performance` returns the model's evaluation history.

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{PerformanceHistory, PredictionFeedback, PredictionResult, VehicleRecord};
use crate::util::version::user_agent;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

const PREDICT_PATH: &str = "predict";
const FEEDBACK_PATH: &str = "feedback";
const PERFORMANCE_PATH: &str = "model-performance";

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {endpoint} returned {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
}

#[derive(Clone, Debug)]
pub struct PredictionApiClient {
    http: Client,
    base_url: Url,
}

impl PredictionApiClient {
    pub fn new() -> Result<Self, ApiClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, ApiClientError> {
        Self::from_url(Url::parse(base)?)
    }

    /// Relative paths are joined onto `base_url`, so a base with a path
    /// component needs its trailing slash.
    pub fn from_url(mut base_url: Url) -> Result<Self, ApiClientError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn predict(&self, record: &VehicleRecord) -> Result<PredictionResult, ApiClientError> {
        let url = self.url(PREDICT_PATH)?;
        tracing::debug!(%url, vin = %record.vin, "requesting price prediction");
        let builder = self.http.post(url).json(record);
        self.fetch_json(PREDICT_PATH, builder).await
    }

    /// Sends a correctness signal. Whatever the service answers with is
    /// ignored once the status is a success.
    pub async fn send_feedback(&self, feedback: &PredictionFeedback) -> Result<(), ApiClientError> {
        let url = self.url(FEEDBACK_PATH)?;
        tracing::debug!(
            %url,
            accurate = feedback.is_accurate,
            "sending prediction feedback"
        );
        let builder = self.http.post(url).json(feedback);
        self.send(FEEDBACK_PATH, builder).await?;
        Ok(())
    }

    pub async fn model_performance(&self) -> Result<PerformanceHistory, ApiClientError> {
        let url = self.url(PERFORMANCE_PATH)?;
        tracing::debug!(%url, "requesting model performance history");
        let builder = self.http.get(url);
        self.fetch_json(PERFORMANCE_PATH, builder).await
    }

    async fn fetch_json<T>(
        &self,
        endpoint: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(endpoint, builder).await?;
        response.json::<T>().await.map_err(|err| {
            tracing::warn!("failed to decode {endpoint} response: {err}");
            ApiClientError::Http(err)
        })
    }

    async fn send(
        &self,
        endpoint: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiClientError> {
        let response = builder.send().await.map_err(|err| {
            tracing::warn!("{endpoint} request failed: {err}");
            ApiClientError::Http(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{endpoint} returned {status}");
            return Err(ApiClientError::Status { endpoint, status });
        }
        Ok(response)
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

//! Vehicle purchase price prediction.
//!
//! A [`domain::FormSession`] collects vehicle attributes, validates them and
//! hands the finished [`domain::VehicleRecord`] to a
//! [`infra::predictor::PricePredictor`]: either the offline demo estimator or
//! the remote prediction service, chosen through [`config::PredictorConfig`].

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;
pub mod util;

pub use app::{submit, submit_feedback, FeedbackError, SubmissionError};
pub use config::{Backend, ConfigError, PredictorConfig};
pub use infra::{
    api::{ApiClientError, PredictionApiClient},
    predictor::{DemoPredictor, PricePredictor},
};

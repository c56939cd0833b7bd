use serde::{Deserialize, Serialize};

use super::entities::VehicleRecord;

/// Accuracy snapshot of the pricing model at the time of the prediction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    /// Root-mean-square error; lower is better.
    pub rmse: f64,
    /// Coefficient of determination; conventionally in [0, 1] but not enforced.
    pub r2_score: f64,
}

impl ModelPerformance {
    pub fn r2_percent(&self) -> f64 {
        self.r2_score * 100.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub model_performance: ModelPerformance,
}

impl PredictionResult {
    /// Predicted price as whole US dollars, e.g. `$26,700`.
    pub fn formatted_price(&self) -> String {
        format_usd(self.predicted_price)
    }
}

/// Correctness signal sent back to the service after a prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_id: Option<String>,
    pub predicted_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<f64>,
    pub is_accurate: bool,
    pub vehicle_data: VehicleRecord,
}

/// Historical model performance as returned by the service. The payload shape
/// is owned by the backend, so it is kept as raw JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceHistory(pub serde_json::Value);

pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}

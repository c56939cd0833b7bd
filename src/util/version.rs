pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_label() -> String {
    format!("v{APP_VERSION}")
}

/// User agent sent with every request to the prediction service.
pub fn user_agent() -> String {
    format!("vehicle-price-predictor/{}", version_label())
}

//! Placeholder pricing used when no prediction service is wired in.

use super::entities::{ConditionStatus, VehicleRecord};
use super::prediction::{ModelPerformance, PredictionResult};

pub const BASE_PRICE: f64 = 20_000.0;
pub const BASELINE_YEAR: i32 = 2010;
pub const PER_YEAR: f64 = 500.0;
pub const PER_10K_KM: f64 = 800.0;
pub const PRICE_FLOOR: f64 = 5_000.0;

/// Last known evaluation of the real model, reported alongside demo prices.
pub const LAST_KNOWN_PERFORMANCE: ModelPerformance = ModelPerformance {
    rmse: 2456.78,
    r2_score: 0.85,
};

pub fn condition_adjustment(condition: ConditionStatus) -> f64 {
    match condition {
        ConditionStatus::Excellent => 5_000.0,
        ConditionStatus::Good => 2_500.0,
        ConditionStatus::Fair => 0.0,
        ConditionStatus::Poor => -2_500.0,
    }
}

pub fn year_adjustment(year: i32) -> f64 {
    (f64::from(year) - f64::from(BASELINE_YEAR)) * PER_YEAR
}

/// Distance only ever lowers the price, linearly per 10,000 km.
pub fn distance_adjustment(kilometers: u32) -> f64 {
    -(f64::from(kilometers) / 10_000.0) * PER_10K_KM
}

pub fn estimate_price(record: &VehicleRecord) -> PredictionResult {
    let raw = BASE_PRICE
        + year_adjustment(record.year)
        + distance_adjustment(record.kilometers_driven)
        + condition_adjustment(record.vehicle_condition_status);

    PredictionResult {
        predicted_price: raw.max(PRICE_FLOOR),
        model_performance: LAST_KNOWN_PERFORMANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::sample_record;

    fn record(year: i32, kilometers: u32, condition: ConditionStatus) -> VehicleRecord {
        VehicleRecord {
            year,
            kilometers_driven: kilometers,
            vehicle_condition_status: condition,
            ..sample_record()
        }
    }

    #[test]
    fn baseline_excellent() {
        let result = estimate_price(&record(2010, 0, ConditionStatus::Excellent));
        assert_eq!(result.predicted_price, 25_000.0);
    }

    #[test]
    fn newer_with_some_distance() {
        let result = estimate_price(&record(2020, 10_000, ConditionStatus::Good));
        assert_eq!(result.predicted_price, 26_700.0);
    }

    #[test]
    fn older_poor_vehicle() {
        let result = estimate_price(&record(2000, 50_000, ConditionStatus::Poor));
        assert_eq!(result.predicted_price, 8_500.0);
    }

    #[test]
    fn fair_condition_is_neutral() {
        let result = estimate_price(&record(2010, 0, ConditionStatus::Fair));
        assert_eq!(result.predicted_price, BASE_PRICE);
    }

    #[test]
    fn fractional_distance_scales_linearly() {
        let result = estimate_price(&record(2010, 5_000, ConditionStatus::Fair));
        assert_eq!(result.predicted_price, 19_600.0);
    }

    #[test]
    fn price_is_clamped_to_floor() {
        let result = estimate_price(&record(1990, 400_000, ConditionStatus::Poor));
        assert_eq!(result.predicted_price, PRICE_FLOOR);

        for kilometers in [0, 10_000, 250_000, u32::MAX] {
            for condition in ConditionStatus::ALL.iter().copied() {
                let result = estimate_price(&record(1990, kilometers, condition));
                assert!(result.predicted_price >= PRICE_FLOOR);
            }
        }
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        assert_eq!(year_adjustment(i32::MIN), (f64::from(i32::MIN) - 2010.0) * PER_YEAR);
        let result = estimate_price(&record(i32::MIN, 0, ConditionStatus::Excellent));
        assert_eq!(result.predicted_price, PRICE_FLOOR);
        let result = estimate_price(&record(i32::MAX, 0, ConditionStatus::Fair));
        assert!(result.predicted_price > BASE_PRICE);
    }

    #[test]
    fn reports_fixed_metrics() {
        let result = estimate_price(&sample_record());
        assert_eq!(result.model_performance.rmse, 2456.78);
        assert_eq!(result.model_performance.r2_score, 0.85);
    }

    #[test]
    fn estimation_is_deterministic() {
        let input = sample_record();
        assert_eq!(estimate_price(&input), estimate_price(&input));
    }
}

//! Vehicle pricing domain: form data, validation and the demo estimator.

pub mod entities;
pub mod estimation;
pub mod prediction;
pub mod session;
pub mod validation;

pub use entities::{
    BodyType, Color, ConditionStatus, EngineType, FuelType, Manufacturer, Transmission,
    UnknownOption, VehicleDraft, VehicleRecord,
};
pub use estimation::estimate_price;
pub use prediction::{ModelPerformance, PerformanceHistory, PredictionFeedback, PredictionResult};
pub use session::{FieldError, FormSession, Notice, NoticeKind, StoredPrediction};
pub use validation::{missing_fields, validate, validate_at, RequiredField, ValidationError};

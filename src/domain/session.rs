use thiserror::Error;
use time::{macros::format_description, Date};
use uuid::Uuid;

use super::entities::{UnknownOption, VehicleDraft, VehicleRecord};
use super::prediction::{PredictionFeedback, PredictionResult};
use super::validation::{validate, ValidationError};
use crate::util::generate_id;

/// Oldest notices are dropped past this many.
pub const MAX_NOTICES: usize = 5;

pub const GENERIC_FAILURE_MESSAGE: &str =
    "There was a problem getting the prediction. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message raised by a session transition. Presenting and
/// dismissing it is up to the front end.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: String,
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("notice"),
            kind,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// The most recent successful prediction together with what was submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredPrediction {
    pub id: Uuid,
    pub record: VehicleRecord,
    pub result: PredictionResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error(transparent)]
    UnknownOption(#[from] UnknownOption),
}

/// State of one interactive form. Owned by the caller and threaded through
/// every transition; nothing here is shared between sessions.
#[derive(Clone, Debug, Default)]
pub struct FormSession {
    pub draft: VehicleDraft,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub last_prediction: Option<StoredPrediction>,
    pub notices: Vec<Notice>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: VehicleDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_prediction.as_ref().map(|stored| &stored.result)
    }

    /// Applies one raw form input. Numeric fields parse as integers, select
    /// fields by their display label, the purchase date as `YYYY-MM-DD`.
    /// An empty select value or year clears the field.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        let draft = &mut self.draft;
        let trimmed = value.trim();
        match name {
            "vin" => draft.vin = value.to_string(),
            "manufacturer" => draft.manufacturer = parse_option(trimmed)?,
            "year" if trimmed.is_empty() => draft.year = None,
            "year" => draft.year = Some(parse_number("year", trimmed)?),
            "color" => draft.color = parse_option(trimmed)?,
            "body_type" => draft.body_type = parse_option(trimmed)?,
            "engine_type" => draft.engine_type = parse_option(trimmed)?,
            "transmission" => draft.transmission = parse_option(trimmed)?,
            "fuel_type" => draft.fuel_type = parse_option(trimmed)?,
            "seating_capacity" => {
                draft.seating_capacity = parse_number("seating_capacity", trimmed)?
            }
            "kilometers_driven" => {
                draft.kilometers_driven = parse_number("kilometers_driven", trimmed)?
            }
            "vehicle_condition_status" => draft.vehicle_condition_status = parse_option(trimmed)?,
            "purchase_date" => {
                let format = format_description!("[year]-[month]-[day]");
                draft.purchase_date =
                    Date::parse(trimmed, &format).map_err(|_| FieldError::InvalidValue {
                        field: "purchase_date",
                        value: value.to_string(),
                    })?
            }
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Validates the draft and, when complete, enters the loading state and
    /// hands back the record to predict. A rejected draft raises a warning
    /// notice and leaves the session otherwise untouched.
    pub fn begin_submission(&mut self) -> Result<VehicleRecord, ValidationError> {
        match validate(&self.draft) {
            Ok(record) => {
                if self.is_loading {
                    tracing::debug!("submission started while a previous one is pending");
                }
                self.is_loading = true;
                self.last_error = None;
                Ok(record)
            }
            Err(err) => {
                tracing::debug!("submission rejected: {err}");
                let title = match &err {
                    ValidationError::MissingFields(_) => "Missing required fields",
                    ValidationError::OutOfRange { .. } => "Invalid value",
                };
                self.push_notice(Notice::new(NoticeKind::Warning, title, err.to_string()));
                Err(err)
            }
        }
    }

    pub fn complete_submission(&mut self, record: VehicleRecord, result: PredictionResult) {
        self.is_loading = false;
        self.last_error = None;
        let id = Uuid::new_v4();
        tracing::info!(
            prediction_id = %id,
            price = result.predicted_price,
            "prediction complete"
        );
        self.last_prediction = Some(StoredPrediction { id, record, result });
        self.push_notice(Notice::new(
            NoticeKind::Success,
            "Prediction complete",
            "Your vehicle price prediction is ready to view",
        ));
    }

    /// Records a failed attempt. The underlying error is only logged; the
    /// user sees a generic message and may resubmit.
    pub fn fail_submission(&mut self, error: &dyn std::error::Error) {
        tracing::warn!("prediction failed: {error}");
        self.is_loading = false;
        self.last_error = Some(GENERIC_FAILURE_MESSAGE.to_string());
        self.push_notice(Notice::new(
            NoticeKind::Error,
            "Error",
            "Failed to get prediction. Please try again.",
        ));
    }

    /// Builds feedback for the last stored prediction, if there is one.
    pub fn feedback(
        &self,
        is_accurate: bool,
        actual_price: Option<f64>,
    ) -> Option<PredictionFeedback> {
        self.last_prediction
            .as_ref()
            .map(|stored| PredictionFeedback {
                prediction_id: Some(stored.id.to_string()),
                predicted_price: stored.result.predicted_price,
                actual_price,
                is_accurate,
                vehicle_data: stored.record.clone(),
            })
    }

    pub fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= MAX_NOTICES {
            self.notices.remove(0);
        }
        self.notices.push(notice);
    }

    pub fn dismiss_notice(&mut self, id: &str) {
        self.notices.retain(|notice| notice.id != id);
    }
}

fn parse_option<T>(value: &str) -> Result<Option<T>, FieldError>
where
    T: std::str::FromStr<Err = UnknownOption>,
{
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, FieldError> {
    value.parse().map_err(|_| FieldError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

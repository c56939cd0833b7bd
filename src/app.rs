//! Session-level flows that reach the prediction backend.

use thiserror::Error;

use crate::{
    domain::{FormSession, Notice, NoticeKind, ValidationError},
    infra::{api::ApiClientError, api::PredictionApiClient, predictor::PricePredictor},
};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("prediction request failed: {0}")]
    Request(#[from] ApiClientError),
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("no prediction to give feedback on")]
    NoPrediction,
    #[error("feedback request failed: {0}")]
    Request(#[from] ApiClientError),
}

/// Runs one submission: validate, predict, record the outcome. The session
/// always comes back ready for another attempt, whatever the result.
pub async fn submit(
    mut session: FormSession,
    predictor: &dyn PricePredictor,
) -> (FormSession, Result<(), SubmissionError>) {
    let record = match session.begin_submission() {
        Ok(record) => record,
        Err(err) => return (session, Err(err.into())),
    };

    tracing::debug!(predictor = predictor.name(), vin = %record.vin, "submitting vehicle");
    match predictor.predict(&record).await {
        Ok(result) => {
            session.complete_submission(record, result);
            (session, Ok(()))
        }
        Err(err) => {
            session.fail_submission(&err);
            (session, Err(err.into()))
        }
    }
}

/// Reports whether the last prediction matched reality.
pub async fn submit_feedback(
    session: &mut FormSession,
    client: &PredictionApiClient,
    is_accurate: bool,
    actual_price: Option<f64>,
) -> Result<(), FeedbackError> {
    let feedback = session
        .feedback(is_accurate, actual_price)
        .ok_or(FeedbackError::NoPrediction)?;

    match client.send_feedback(&feedback).await {
        Ok(()) => {
            session.push_notice(Notice::new(
                NoticeKind::Success,
                "Feedback sent",
                "Thanks for helping improve the model",
            ));
            Ok(())
        }
        Err(err) => {
            session.push_notice(Notice::new(
                NoticeKind::Error,
                "Error",
                "Failed to send feedback. Please try again.",
            ));
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::domain::{
        estimate_price, fixtures::sample_record, session::GENERIC_FAILURE_MESSAGE,
        PredictionResult, VehicleDraft, VehicleRecord,
    };
    use crate::infra::predictor::DemoPredictor;

    struct UnavailablePredictor;

    #[async_trait]
    impl PricePredictor for UnavailablePredictor {
        fn name(&self) -> &'static str {
            "unavailable"
        }

        async fn predict(
            &self,
            _record: &VehicleRecord,
        ) -> Result<PredictionResult, ApiClientError> {
            Err(ApiClientError::Status {
                endpoint: "predict",
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }

    fn filled_session() -> FormSession {
        FormSession::with_draft(VehicleDraft::from(sample_record()))
    }

    #[tokio::test]
    async fn demo_submission_stores_estimate() {
        let (session, outcome) = submit(filled_session(), &DemoPredictor::instant()).await;
        assert!(outcome.is_ok());
        assert!(!session.is_loading);
        assert_eq!(session.last_result(), Some(&estimate_price(&sample_record())));
    }

    #[tokio::test]
    async fn incomplete_draft_never_reaches_predictor() {
        let mut session = filled_session();
        session.draft.vin.clear();

        let (session, outcome) = submit(session, &UnavailablePredictor).await;
        assert!(matches!(outcome, Err(SubmissionError::Validation(_))));
        assert!(session.last_error.is_none());
        assert_eq!(session.notices.last().map(|n| n.kind), Some(NoticeKind::Warning));
    }

    #[tokio::test]
    async fn service_error_keeps_session_resubmittable() {
        let (session, outcome) = submit(filled_session(), &UnavailablePredictor).await;
        assert!(matches!(
            outcome,
            Err(SubmissionError::Request(ApiClientError::Status { .. }))
        ));
        assert!(!session.is_loading);
        assert!(session.last_prediction.is_none());
        assert_eq!(session.last_error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));

        let (session, outcome) = submit(session, &DemoPredictor::instant()).await;
        assert!(outcome.is_ok());
        assert!(session.last_error.is_none());
        assert!(session.last_prediction.is_some());
    }

    #[tokio::test]
    async fn failure_does_not_clear_previous_result() {
        let (session, _) = submit(filled_session(), &DemoPredictor::instant()).await;
        let previous = session.last_prediction.clone();

        let (session, outcome) = submit(session, &UnavailablePredictor).await;
        assert!(outcome.is_err());
        assert_eq!(session.last_prediction, previous);
    }

    #[tokio::test]
    async fn feedback_requires_a_prediction() {
        let mut session = filled_session();
        let client = PredictionApiClient::new().unwrap();
        let outcome = submit_feedback(&mut session, &client, true, None).await;
        assert!(matches!(outcome, Err(FeedbackError::NoPrediction)));
    }
}

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::api::{error::ApiError, state::AppState, types::*};
use crate::domain::PredictRequest;
use crate::error::ValidationError;
use crate::ml::ModelRunner;

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let request = body.validate()?;

    let request_id = Uuid::new_v4();
    let kind = ModelRunner::kind_for(&request);
    let span = info_span!("predict", %request_id, model = %kind);

    async move {
        let started = Instant::now();
        let output = state.model.predict(&request).await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let (home_team_id, away_team_id) = match request.team_ids() {
            Some((home, away)) => (Some(home), Some(away)),
            None => (None, None),
        };
        info!(elapsed_ms, "Prediction served");

        Ok::<_, ApiError>(Json(PredictResponse {
            success: true,
            home_win_probability: output.home_win_probability(),
            predictions: output.predictions().cloned(),
            feature_details: output.features().cloned(),
            metadata: PredictMetadata {
                home_team_id,
                away_team_id,
                home_rest_days: request.home_rest_days(),
                request_id,
                model: kind.to_string(),
                elapsed_ms,
            },
        }))
    }
    .instrument(span)
    .await
}

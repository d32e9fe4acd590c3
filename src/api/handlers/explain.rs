use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, error, warn};

use crate::api::{error::ApiError, state::AppState, types::*};
use crate::domain::MatchupMetadata;
use crate::error::ValidationError;
use crate::explain::{explanation_prompt, TeamNames};

/// POST /api/explain
pub async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;

    let (predictions, metadata) = match (body.predictions, body.metadata) {
        (Some(predictions), Some(metadata)) => (predictions, metadata),
        _ => return Err(ValidationError::MissingPredictionData.into()),
    };

    let names = resolve_team_names(&state, body.team_names.unwrap_or_default(), &metadata).await;
    let prompt = explanation_prompt(&predictions, &metadata, &names);
    debug!("Explanation prompt: {}", prompt);

    let explanation = state.explainer.generate(&prompt).await.map_err(|e| {
        error!("Explanation error: {}", e);
        ApiError::Internal("Failed to generate explanation".to_string())
    })?;

    Ok(Json(ExplainResponse {
        success: true,
        explanation,
        predictions,
        metadata,
    }))
}

/// Fill missing display names from the team store; lookup failures fall back to ids
async fn resolve_team_names(
    state: &AppState,
    names: TeamNames,
    metadata: &MatchupMetadata,
) -> TeamNames {
    if names.is_complete() {
        return names;
    }
    let Some(store) = &state.teams else {
        return names;
    };

    let mut looked_up = TeamNames::default();
    for (slot, team_id) in [
        (&mut looked_up.home, metadata.home_team_id),
        (&mut looked_up.away, metadata.away_team_id),
    ] {
        match store.get_team(team_id).await {
            Ok(team) => *slot = team.map(|t| t.name),
            Err(e) => warn!(team_id, "Team name lookup failed: {}", e),
        }
    }

    names.or(looked_up)
}

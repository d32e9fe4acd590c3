use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use crate::adapters::clamp_game_limit;
use crate::api::{error::ApiError, state::AppState, types::*};
use crate::domain::{Game, Team};
use crate::error::ValidationError;

fn team_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ValidationError::MalformedBody(e.body_text()).into())
}

/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let store = state.team_store()?;
    Ok(Json(store.list_teams().await?))
}

/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Team>, ApiError> {
    let id = team_id(path)?;
    let store = state.team_store()?;
    store
        .get_team(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))
}

/// GET /api/teams/:id/games?limit=10
pub async fn get_team_games(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<GamesQuery>, QueryRejection>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let id = team_id(path)?;
    let Query(query) = query.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let store = state.team_store()?;

    if store.get_team(id).await?.is_none() {
        return Err(ApiError::NotFound("Team not found".to_string()));
    }

    let limit = clamp_game_limit(query.limit);
    Ok(Json(store.recent_games(id, limit).await?))
}

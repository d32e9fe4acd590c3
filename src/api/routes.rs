use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState, permissive_cors: bool) -> Router {
    let router = Router::new()
        // Prediction endpoints
        .route("/api/predict", post(handlers::predict))
        .route("/api/explain", post(handlers::explain))
        // Team endpoints
        .route("/api/teams", get(handlers::list_teams))
        .route("/api/teams/:id", get(handlers::get_team))
        .route("/api/teams/:id/games", get(handlers::get_team_games))
        // System endpoints
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state);

    if permissive_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

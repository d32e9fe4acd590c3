mod common;

use axum::{http::StatusCode, Router};
use chrono::NaiveDate;
use common::{get, post_json, unreachable_runner, CannedGenerator};
use hoopcast::{
    api::create_router,
    domain::{Game, Team},
    AppState, MemoryTeamStore,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn league() -> MemoryTeamStore {
    MemoryTeamStore::with_teams([
        Team::new(2, "Boston Celtics", "BOS"),
        Team::new(14, "Los Angeles Lakers", "LAL"),
        Team::new(7, "Denver Nuggets", "DEN"),
    ])
}

fn game(id: i64, day: u32, home: i32, away: i32, scores: Option<(i32, i32)>) -> Game {
    Game {
        id,
        game_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        home_team_id: home,
        away_team_id: away,
        home_score: scores.map(|s| s.0),
        away_score: scores.map(|s| s.1),
    }
}

fn app_with(generator: Arc<CannedGenerator>, store: Option<MemoryTeamStore>) -> Router {
    let mut state = AppState::new(unreachable_runner(), generator);
    if let Some(store) = store {
        state = state.with_team_store(Arc::new(store));
    }
    create_router(state, false)
}

fn explain_body(team_names: Option<Value>) -> Value {
    let mut body = json!({
        "predictions": {
            "basic_model": {"probability": 0.684, "accuracy": 0.711},
            "advanced_model": {"probability": 0.6, "accuracy": 0.606}
        },
        "metadata": {"home_team_id": 2, "away_team_id": 14, "home_rest_days": 1}
    });
    if let Some(names) = team_names {
        body["teamNames"] = names;
    }
    body
}

// ============================================================================
// /api/explain
// ============================================================================

#[tokio::test]
async fn explain_returns_generated_text_and_echoes_input() {
    let generator = CannedGenerator::replying("Boston should handle this one at home.");
    let app = app_with(generator.clone(), None);

    let (status, body) = post_json(
        app,
        "/api/explain",
        explain_body(Some(json!({"home": "Celtics", "away": "Lakers"}))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["explanation"], "Boston should handle this one at home.");
    assert_eq!(body["predictions"]["basic_model"]["probability"], 0.684);
    assert_eq!(body["metadata"]["home_rest_days"], 1);

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("Celtics (home) vs Lakers (away)"));
    assert!(prompt.contains("Home team win probability: 68%"));
    assert!(prompt.contains("Model accuracy: 71%"));
    assert!(prompt.contains("Home team rest days: 1"));
}

#[tokio::test]
async fn explain_resolves_names_from_the_store() {
    let generator = CannedGenerator::replying("ok");
    let app = app_with(generator.clone(), Some(league()));

    let (status, _) = post_json(app, "/api/explain", explain_body(None)).await;
    assert_eq!(status, StatusCode::OK);

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("Boston Celtics (home) vs Los Angeles Lakers (away)"));
}

#[tokio::test]
async fn explain_without_names_or_store_uses_ids() {
    let generator = CannedGenerator::replying("ok");
    let app = app_with(generator.clone(), None);

    let (status, _) = post_json(app, "/api/explain", explain_body(None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(generator
        .last_prompt()
        .unwrap()
        .contains("Team 2 (home) vs Team 14 (away)"));
}

#[tokio::test]
async fn explain_requires_predictions_and_metadata() {
    for body in [
        json!({}),
        json!({"metadata": {"home_team_id": 2, "away_team_id": 14, "home_rest_days": 1}}),
        json!({"predictions": {"basic_model": {"probability": 0.5}}}),
    ] {
        let generator = CannedGenerator::replying("unused");
        let (status, response) = post_json(app_with(generator.clone(), None), "/api/explain", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Missing prediction data");
        assert!(generator.last_prompt().is_none());
    }
}

#[tokio::test]
async fn explain_generation_failure_is_a_server_error() {
    let (status, body) = post_json(
        app_with(CannedGenerator::failing(), None),
        "/api/explain",
        explain_body(None),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate explanation");
}

// ============================================================================
// /api/teams
// ============================================================================

#[tokio::test]
async fn teams_are_listed_by_name() {
    let (status, body) = get(app_with(CannedGenerator::failing(), Some(league())), "/api/teams").await;

    assert_eq!(status, StatusCode::OK);
    let abbreviations: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["abbreviation"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(abbreviations, vec!["BOS", "DEN", "LAL"]);
}

#[tokio::test]
async fn single_team_lookup() {
    let app = app_with(CannedGenerator::failing(), Some(league()));
    let (status, body) = get(app, "/api/teams/14").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Los Angeles Lakers");

    let app = app_with(CannedGenerator::failing(), Some(league()));
    let (status, body) = get(app, "/api/teams/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Team not found");

    let app = app_with(CannedGenerator::failing(), Some(league()));
    let (status, _) = get(app, "/api/teams/celtics").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recent_games_are_newest_first_and_limited() {
    let store = league();
    store.insert_game(game(1, 1, 2, 14, Some((110, 104)))).await;
    store.insert_game(game(2, 4, 7, 2, Some((98, 101)))).await;
    store.insert_game(game(3, 6, 7, 14, Some((120, 99)))).await;
    store.insert_game(game(4, 9, 14, 2, None)).await;

    let app = app_with(CannedGenerator::failing(), Some(store));
    let (status, body) = get(app, "/api/teams/2/games?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 2]);
    assert!(body[0]["home_score"].is_null());
}

#[tokio::test]
async fn bad_game_limit_is_a_json_bad_request() {
    for uri in ["/api/teams/2/games?limit=abc", "/api/teams/2/games?limit=1.5"] {
        let (status, body) = get(app_with(CannedGenerator::failing(), Some(league())), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }
}

#[tokio::test]
async fn team_routes_need_a_store() {
    for uri in ["/api/teams", "/api/teams/2", "/api/teams/2/games"] {
        let (status, body) = get(app_with(CannedGenerator::failing(), None), uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(body["error"], "Team store not configured");
    }
}

// ============================================================================
// System
// ============================================================================

#[tokio::test]
async fn health_reports_store_state() {
    let (status, body) = get(app_with(CannedGenerator::failing(), None), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "disabled");

    let (_, body) = get(app_with(CannedGenerator::failing(), Some(league())), "/api/health").await;
    assert_eq!(body["db"], "connected");
    assert!(body["uptime_secs"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn unknown_routes_are_json_404s() {
    let (status, body) = get(app_with(CannedGenerator::failing(), None), "/api/standings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}

use crate::domain::{MatchupMetadata, PredictionSet};
use crate::explain::TeamNames;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ============================================================================
// Prediction Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub success: bool,
    pub home_win_probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<PredictionSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_details: Option<Value>,
    pub metadata: PredictMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team_id: Option<i32>,
    pub home_rest_days: u8,
    pub request_id: Uuid,
    /// Which configured executable served the request
    pub model: String,
    pub elapsed_ms: u64,
}

// ============================================================================
// Explanation Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub predictions: Option<PredictionSet>,
    #[serde(default)]
    pub metadata: Option<MatchupMetadata>,
    #[serde(default, rename = "teamNames")]
    pub team_names: Option<TeamNames>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: String,
    pub predictions: PredictionSet,
    pub metadata: MatchupMetadata,
}

// ============================================================================
// Team Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    pub limit: Option<i64>,
}

// ============================================================================
// Health Check Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub db: String,
    pub uptime_secs: i64,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

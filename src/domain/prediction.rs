use serde::{Deserialize, Serialize};

/// Win probability from one model, with the accuracy it was declared to have
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl ModelPrediction {
    pub fn new(probability: f64, accuracy: Option<f64>) -> Self {
        Self {
            probability,
            accuracy,
        }
    }

    /// Probability as a whole percentage, rounded half away from zero
    pub fn probability_pct(&self) -> i64 {
        (self.probability * 100.0).round() as i64
    }

    pub fn accuracy_pct(&self) -> Option<i64> {
        self.accuracy.map(|a| (a * 100.0).round() as i64)
    }
}

/// Output of the two-model matchup predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    pub basic_model: ModelPrediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_model: Option<ModelPrediction>,
}

/// Ids and rest days a prediction was made for, in the model's snake_case shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupMetadata {
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_rest_days: u8,
}

pub fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

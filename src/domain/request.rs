//! Matchup requests accepted by the prediction route.
//!
//! The route takes either a pair of team ids (the matchup model fetches its
//! own stats) or a pair of partial stat lines (the feature model is fed a
//! fixed-order vector). Validation happens here, before any process is spawned.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const MAX_REST_DAYS: i64 = 7;

/// League-average fallbacks for absent stat fields
pub const LEAGUE_AVG_POINTS: f64 = 110.0;
pub const NEUTRAL_WIN_PCT: f64 = 0.5;
pub const NEUTRAL_NET_RATING: f64 = 0.0;

/// Partial season stat line for one side of the matchup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    #[serde(default)]
    pub avg_pts: Option<f64>,
    #[serde(default)]
    pub avg_pts_allowed: Option<f64>,
    #[serde(default)]
    pub win_pct: Option<f64>,
    #[serde(default)]
    pub net_rating: Option<f64>,
}

/// Raw request body; every field optional so missing ones map to a 400, not a rejection
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default)]
    pub home_team_id: Option<i64>,
    #[serde(default)]
    pub away_team_id: Option<i64>,
    #[serde(default)]
    pub home_team_stats: Option<TeamStats>,
    #[serde(default)]
    pub away_team_stats: Option<TeamStats>,
    #[serde(default)]
    pub home_rest_days: Option<i64>,
}

/// A validated request, ready to be turned into a model payload
#[derive(Debug, Clone, PartialEq)]
pub enum GameRequest {
    Matchup {
        home_team_id: i32,
        away_team_id: i32,
        home_rest_days: u8,
    },
    Stats {
        home: TeamStats,
        away: TeamStats,
        home_rest_days: u8,
    },
}

impl PredictRequest {
    pub fn by_ids(home: i64, away: i64, rest_days: i64) -> Self {
        Self {
            home_team_id: Some(home),
            away_team_id: Some(away),
            home_rest_days: Some(rest_days),
            ..Self::default()
        }
    }

    /// Check presence, distinct teams and rest-day range, in that order
    pub fn validate(self) -> Result<GameRequest, ValidationError> {
        // zero ids count as absent
        let home_id = self.home_team_id.filter(|id| *id != 0);
        let away_id = self.away_team_id.filter(|id| *id != 0);

        let rest_days = self
            .home_rest_days
            .ok_or(ValidationError::MissingParameters)?;

        match (home_id, away_id, self.home_team_stats, self.away_team_stats) {
            (Some(home), Some(away), _, _) => {
                if home == away {
                    return Err(ValidationError::SameTeam);
                }
                let home_rest_days = check_rest_days(rest_days)?;
                Ok(GameRequest::Matchup {
                    home_team_id: team_id(home)?,
                    away_team_id: team_id(away)?,
                    home_rest_days,
                })
            }
            (_, _, Some(home), Some(away)) => Ok(GameRequest::Stats {
                home,
                away,
                home_rest_days: check_rest_days(rest_days)?,
            }),
            _ => Err(ValidationError::MissingParameters),
        }
    }
}

fn check_rest_days(rest_days: i64) -> Result<u8, ValidationError> {
    if !(0..=MAX_REST_DAYS).contains(&rest_days) {
        return Err(ValidationError::RestDaysOutOfRange { rest_days });
    }
    Ok(rest_days as u8)
}

fn team_id(raw: i64) -> Result<i32, ValidationError> {
    match i32::try_from(raw) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::MalformedBody(format!(
            "team id {raw} is out of range"
        ))),
    }
}

impl GameRequest {
    pub fn home_rest_days(&self) -> u8 {
        match self {
            GameRequest::Matchup { home_rest_days, .. } => *home_rest_days,
            GameRequest::Stats { home_rest_days, .. } => *home_rest_days,
        }
    }

    pub fn team_ids(&self) -> Option<(i32, i32)> {
        match self {
            GameRequest::Matchup {
                home_team_id,
                away_team_id,
                ..
            } => Some((*home_team_id, *away_team_id)),
            GameRequest::Stats { .. } => None,
        }
    }

    /// Feature order the basic model was trained on:
    /// home_avg_pts, away_avg_pts_scored, away_avg_pts_allowed, home_win_pct,
    /// home_net_rating, home_rest_days
    pub fn feature_vector(home: &TeamStats, away: &TeamStats, home_rest_days: u8) -> [f64; 6] {
        [
            home.avg_pts.unwrap_or(LEAGUE_AVG_POINTS),
            away.avg_pts.unwrap_or(LEAGUE_AVG_POINTS),
            away.avg_pts_allowed.unwrap_or(LEAGUE_AVG_POINTS),
            home.win_pct.unwrap_or(NEUTRAL_WIN_PCT),
            home.net_rating.unwrap_or(NEUTRAL_NET_RATING),
            f64::from(home_rest_days),
        ]
    }

    /// JSON handed to the model process
    pub fn payload(&self) -> Value {
        match self {
            GameRequest::Matchup {
                home_team_id,
                away_team_id,
                home_rest_days,
            } => json!({
                "home_team_id": home_team_id,
                "away_team_id": away_team_id,
                "home_rest_days": home_rest_days,
            }),
            GameRequest::Stats {
                home,
                away,
                home_rest_days,
            } => json!(Self::feature_vector(home, away, *home_rest_days)),
        }
    }
}

use async_trait::async_trait;

use crate::domain::{Game, Team};
use crate::error::Result;

/// Upper bound for recent-game lookups (one regular season)
pub const MAX_RECENT_GAMES: i64 = 82;
pub const DEFAULT_RECENT_GAMES: i64 = 10;

/// Clamp a caller-supplied limit into `1..=MAX_RECENT_GAMES`
pub fn clamp_game_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_GAMES)
        .clamp(1, MAX_RECENT_GAMES)
}

/// Read-only access to team and game rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// All teams ordered by name
    async fn list_teams(&self) -> Result<Vec<Team>>;

    async fn get_team(&self, id: i32) -> Result<Option<Team>>;

    /// Most recent games involving `team_id`, newest first
    async fn recent_games(&self, team_id: i32, limit: i64) -> Result<Vec<Game>>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> Result<()>;
}

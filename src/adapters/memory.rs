use crate::adapters::TeamStore;
use crate::domain::{Game, Team};
use crate::error::Result;
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process team store used by tests
#[derive(Default)]
pub struct MemoryTeamStore {
    teams: RwLock<BTreeMap<i32, Team>>,
    games: RwLock<Vec<Game>>,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teams(teams: impl IntoIterator<Item = Team>) -> Self {
        Self {
            teams: RwLock::new(teams.into_iter().map(|t| (t.id, t)).collect()),
            games: RwLock::new(Vec::new()),
        }
    }

    pub async fn insert_game(&self, game: Game) {
        self.games.write().await.push(game);
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = self.teams.read().await.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn get_team(&self, id: i32) -> Result<Option<Team>> {
        Ok(self.teams.read().await.get(&id).cloned())
    }

    async fn recent_games(&self, team_id: i32, limit: i64) -> Result<Vec<Game>> {
        let mut games: Vec<Game> = self
            .games
            .read()
            .await
            .iter()
            .filter(|g| g.involves(team_id))
            .cloned()
            .collect();
        games.sort_by_key(|g| Reverse((g.game_date, g.id)));
        games.truncate(limit.max(0) as usize);
        Ok(games)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

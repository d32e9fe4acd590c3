use crate::adapters::TeamStore;
use crate::domain::{Game, Team};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{info, instrument};

/// PostgreSQL storage adapter
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Create a PostgreSQL store from an existing connection pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn team_from_row(r: &PgRow) -> Team {
    Team {
        id: r.get("id"),
        name: r.get("name"),
        abbreviation: r.get("abbreviation"),
    }
}

fn game_from_row(r: &PgRow) -> Game {
    Game {
        id: r.get("id"),
        game_date: r.get("game_date"),
        home_team_id: r.get("home_team_id"),
        away_team_id: r.get("away_team_id"),
        home_score: r.get("home_score"),
        away_score: r.get("away_score"),
    }
}

#[async_trait]
impl TeamStore for PostgresStore {
    #[instrument(skip(self))]
    async fn list_teams(&self) -> Result<Vec<Team>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, abbreviation
            FROM teams
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn get_team(&self, id: i32) -> Result<Option<Team>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, abbreviation
            FROM teams WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    #[instrument(skip(self))]
    async fn recent_games(&self, team_id: i32, limit: i64) -> Result<Vec<Game>> {
        let rows = sqlx::query(
            r#"
            SELECT id, game_date, home_team_id, away_team_id, home_score, away_score
            FROM games
            WHERE home_team_id = $1 OR away_team_id = $1
            ORDER BY game_date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(team_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(game_from_row).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

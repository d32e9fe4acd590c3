use clap::{Parser, Subcommand};

use crate::adapters::{PostgresStore, TeamStore};
use crate::config::AppConfig;
use crate::domain::PredictRequest;
use crate::error::{HoopcastError, Result};
use crate::ml::ModelRunner;

#[derive(Parser)]
#[command(name = "hoopcast")]
#[command(version)]
#[command(about = "NBA game-outcome prediction API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (default.toml, <HOOPCAST_ENV>.toml)
    #[arg(short, long, default_value = "config", env = "HOOPCAST_CONFIG_DIR")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Override bind host
        #[arg(long)]
        host: Option<String>,
        /// Override bind port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the matchup model once and print the result
    Predict {
        /// Home team id
        #[arg(long)]
        home: i64,
        /// Away team id
        #[arg(long)]
        away: i64,
        /// Home team rest days (0-7)
        #[arg(long, default_value = "2")]
        rest: i64,
    },
    /// List teams from the database
    Teams,
    /// Apply database migrations
    Migrate,
}

/// Validate and run a single matchup prediction, printing the parsed output as JSON
pub async fn run_predict(config: &AppConfig, home: i64, away: i64, rest: i64) -> Result<()> {
    let request = PredictRequest::by_ids(home, away, rest).validate()?;
    let runner = ModelRunner::from_config(&config.model);
    let output = runner.predict(&request).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn connect_store(config: &AppConfig) -> Result<PostgresStore> {
    let url = config.database.url.as_deref().ok_or_else(|| {
        HoopcastError::InvalidConfig(
            "database.url is not set (HOOPCAST_DATABASE__URL)".to_string(),
        )
    })?;
    PostgresStore::new(url, config.database.max_connections).await
}

pub async fn list_teams(config: &AppConfig) -> Result<()> {
    let store = connect_store(config).await?;
    let teams = store.list_teams().await?;
    if teams.is_empty() {
        println!("No teams found");
        return Ok(());
    }

    println!("{:>12}  {:<5} {}", "ID", "ABBR", "NAME");
    for team in teams {
        println!("{:>12}  {:<5} {}", team.id, team.abbreviation, team.name);
    }
    Ok(())
}

pub async fn migrate(config: &AppConfig) -> Result<()> {
    let store = connect_store(config).await?;
    store.migrate().await?;
    println!("Migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["hoopcast"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, "config");
    }

    #[test]
    fn test_predict_args() {
        let cli = Cli::try_parse_from(["hoopcast", "predict", "--home", "2", "--away", "14"]).unwrap();
        match cli.command {
            Some(Commands::Predict { home, away, rest }) => {
                assert_eq!((home, away, rest), (2, 14, 2));
            }
            _ => panic!("expected predict"),
        }
    }

    #[tokio::test]
    async fn test_predict_rejects_same_team_before_spawning() {
        let config = AppConfig::default_config();
        let err = run_predict(&config, 3, 3, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Home and away teams cannot be the same");
    }
}

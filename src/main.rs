use clap::Parser;
use hoopcast::adapters::start_api_server;
use hoopcast::api::AppState;
use hoopcast::cli::{self, Cli, Commands};
use hoopcast::config::AppConfig;
use hoopcast::error::{HoopcastError, Result};
use hoopcast::logging::{init_logging, init_logging_simple};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_from(&cli.config)?;

    match cli.command {
        Some(Commands::Predict { home, away, rest }) => {
            init_logging_simple();
            cli::run_predict(&config, home, away, rest).await?;
        }
        Some(Commands::Teams) => {
            init_logging_simple();
            cli::list_teams(&config).await?;
        }
        Some(Commands::Migrate) => {
            init_logging_simple();
            cli::migrate(&config).await?;
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(config).await?;
        }
        None => run_server(config).await?,
    }

    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let _guard = init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for e in &errors {
            tracing::error!("Config error: {}", e);
        }
        return Err(HoopcastError::InvalidConfig(errors.join("; ")));
    }

    info!(
        matchup = %config.model.matchup.program,
        features = %config.model.features.program,
        explainer = %config.explainer.base_url,
        "Starting hoopcast"
    );

    let state = AppState::from_config(&config).await?;
    start_api_server(state, &config.server).await
}

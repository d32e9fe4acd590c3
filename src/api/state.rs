use crate::adapters::{PostgresStore, TeamStore};
use crate::api::error::ApiError;
use crate::config::AppConfig;
use crate::error::Result;
use crate::explain::{OllamaClient, TextGenerator};
use crate::ml::ModelRunner;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// External model invoker
    pub model: Arc<ModelRunner>,

    /// Text generation backend for explanations
    pub explainer: Arc<dyn TextGenerator>,

    /// Team lookups (None when no database is configured)
    pub teams: Option<Arc<dyn TeamStore>>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(model: ModelRunner, explainer: Arc<dyn TextGenerator>) -> Self {
        Self {
            model: Arc::new(model),
            explainer,
            teams: None,
            start_time: Utc::now(),
        }
    }

    pub fn with_team_store(mut self, store: Arc<dyn TeamStore>) -> Self {
        self.teams = Some(store);
        self
    }

    /// Wire up model runner, explainer and (optionally) the database
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let model = ModelRunner::from_config(&config.model);
        let explainer = OllamaClient::new(&config.explainer)?;
        info!(
            endpoint = %explainer.endpoint(),
            model = explainer.model(),
            "Explainer configured"
        );
        let explainer = Arc::new(explainer);
        let state = Self::new(model, explainer);

        match &config.database.url {
            Some(url) => {
                let store =
                    PostgresStore::new(url, config.database.max_connections).await?;
                Ok(state.with_team_store(Arc::new(store)))
            }
            None => {
                info!("No database configured, team lookups disabled");
                Ok(state)
            }
        }
    }

    pub fn team_store(&self) -> std::result::Result<&Arc<dyn TeamStore>, ApiError> {
        self.teams
            .as_ref()
            .ok_or_else(|| ApiError::Unavailable("Team store not configured".to_string()))
    }

    /// Get system uptime in seconds
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}

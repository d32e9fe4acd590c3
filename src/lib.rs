pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod explain;
pub mod logging;
pub mod ml;

pub use adapters::{MemoryTeamStore, PostgresStore, TeamStore};
pub use api::{create_router, AppState};
pub use config::AppConfig;
pub use domain::{GameRequest, ModelPrediction, PredictRequest, PredictionSet, Team};
pub use error::{HoopcastError, Result};
pub use explain::{OllamaClient, TextGenerator};
pub use ml::{ModelOutput, ModelRunner};

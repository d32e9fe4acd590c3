use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub model: ModelConfig,
    pub explainer: ExplainerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Allow any origin/method/header (the browser front end is served elsewhere)
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; team lookups are disabled when absent
    #[serde(default)]
    pub url: Option<String>,
    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

/// How the request payload reaches the model process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayloadTransport {
    /// Appended as the last command-line argument
    #[default]
    Argv,
    /// Written to the child's stdin, which is then closed
    Stdin,
}

/// A program plus its fixed leading arguments
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model invoked with team ids, prints a JSON object
    pub matchup: CommandSpec,
    /// Model invoked with a raw feature vector, prints a float
    pub features: CommandSpec,
    /// Wall-clock limit per invocation
    pub timeout_secs: u64,
    #[serde(default)]
    pub transport: PayloadTransport,
    /// Working directory for the child (model artifacts are loaded relative to it)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainerConfig {
    /// Base URL of the text-generation service
    pub base_url: String,
    /// Model tag passed to the service
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Also write daily-rolling log files into this directory
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_permissive", true)?
            .set_default("database.max_connections", 5)?
            .set_default("model.matchup.program", "python")?
            .set_default("model.matchup.args", vec!["lib/predict2.py"])?
            .set_default("model.features.program", "python")?
            .set_default("model.features.args", vec!["lib/predict.py"])?
            .set_default("model.timeout_secs", 30)?
            .set_default("model.transport", "argv")?
            .set_default("explainer.base_url", "http://localhost:11434")?
            .set_default("explainer.model", "gemma3:4b")?
            .set_default("explainer.timeout_secs", 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("HOOPCAST_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (HOOPCAST_SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("HOOPCAST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Configuration used when no files or environment are present
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_permissive: true,
            },
            database: DatabaseConfig::default(),
            model: ModelConfig {
                matchup: CommandSpec::new("python", &["lib/predict2.py"]),
                features: CommandSpec::new("python", &["lib/predict.py"]),
                timeout_secs: 30,
                transport: PayloadTransport::Argv,
                working_dir: None,
            },
            explainer: ExplainerConfig {
                base_url: "http://localhost:11434".to_string(),
                model: "gemma3:4b".to_string(),
                timeout_secs: 60,
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        for (name, cmd) in [("matchup", &self.model.matchup), ("features", &self.model.features)] {
            if cmd.program.trim().is_empty() {
                errors.push(format!("model.{name}.program must not be empty"));
            }
        }

        if self.model.timeout_secs == 0 {
            errors.push("model.timeout_secs must be positive".to_string());
        }

        if self.explainer.timeout_secs == 0 {
            errors.push("explainer.timeout_secs must be positive".to_string());
        }

        if let Err(e) = url::Url::parse(&self.explainer.base_url) {
            errors.push(format!(
                "explainer.base_url is not a valid URL ({}): {e}",
                self.explainer.base_url
            ));
        }

        if let Some(url) = &self.database.url {
            if url.trim().is_empty() {
                errors.push("database.url must not be blank when set".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

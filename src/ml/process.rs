//! External model invocation.
//!
//! Each prediction spawns the configured program once, hands it a JSON payload
//! (argv or stdin), waits for it to exit and collects stdout/stderr in full.
//! Anything on stderr fails the prediction with that text.

use crate::config::{CommandSpec, ModelConfig, PayloadTransport};
use crate::domain::GameRequest;
use crate::error::{HoopcastError, Result};
use crate::ml::output::{parse_model_output, ModelOutput};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// One configured model executable
#[derive(Debug, Clone)]
pub struct ModelProcess {
    command: CommandSpec,
    transport: PayloadTransport,
    timeout: Duration,
    working_dir: Option<PathBuf>,
}

impl ModelProcess {
    pub fn new(command: CommandSpec, config: &ModelConfig) -> Self {
        Self {
            command,
            transport: config.transport,
            timeout: Duration::from_secs(config.timeout_secs),
            working_dir: config.working_dir.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.command.program
    }

    /// Run the process with `payload` and return its stdout
    pub async fn invoke(&self, payload: &Value) -> Result<String> {
        let payload = serde_json::to_string(payload)?;

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match self.transport {
            PayloadTransport::Argv => {
                cmd.arg(&payload).stdin(Stdio::null());
            }
            PayloadTransport::Stdin => {
                cmd.stdin(Stdio::piped());
            }
        }

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %self.command.program, "Spawning model process");
        let mut child = cmd.spawn().map_err(|e| {
            HoopcastError::ModelProcess(format!(
                "Failed to spawn model process '{}': {}",
                self.command.program, e
            ))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(payload.as_bytes()).await {
                Ok(()) => {}
                // child exited without reading; its stderr and status decide the outcome
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("Model process closed stdin before reading the payload");
                }
                Err(e) => {
                    return Err(HoopcastError::ModelProcess(format!(
                        "Failed to write to model stdin: {}",
                        e
                    )));
                }
            }
            // closing stdin signals end of input
            drop(stdin);
        }

        // the child is killed when the future is dropped on timeout
        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| HoopcastError::ModelTimeout(self.timeout.as_secs()))?
            .map_err(|e| {
                HoopcastError::ModelProcess(format!("Failed to read model output: {}", e))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim_end();
        if !stderr.is_empty() {
            warn!(status = %output.status, "Model process wrote to stderr: {}", stderr);
            return Err(HoopcastError::ModelProcess(stderr.to_string()));
        }

        if !output.status.success() {
            return Err(HoopcastError::ModelProcess(format!(
                "Model process exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Raw model output: {}", stdout.trim());
        Ok(stdout)
    }
}

/// Which executable served a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Matchup,
    Features,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Matchup => "matchup",
            ModelKind::Features => "features",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Routes validated requests to the matchup or feature model
#[derive(Debug, Clone)]
pub struct ModelRunner {
    matchup: ModelProcess,
    features: ModelProcess,
}

impl ModelRunner {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            matchup: ModelProcess::new(config.matchup.clone(), config),
            features: ModelProcess::new(config.features.clone(), config),
        }
    }

    pub fn kind_for(request: &GameRequest) -> ModelKind {
        match request {
            GameRequest::Matchup { .. } => ModelKind::Matchup,
            GameRequest::Stats { .. } => ModelKind::Features,
        }
    }

    fn process(&self, kind: ModelKind) -> &ModelProcess {
        match kind {
            ModelKind::Matchup => &self.matchup,
            ModelKind::Features => &self.features,
        }
    }

    /// Invoke the model for `request` and parse its result
    pub async fn predict(&self, request: &GameRequest) -> Result<ModelOutput> {
        let kind = Self::kind_for(request);
        let started = Instant::now();

        let stdout = self.process(kind).invoke(&request.payload()).await?;
        let output = parse_model_output(&stdout)?;

        info!(
            model = %kind,
            probability = output.home_win_probability(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Prediction complete"
        );
        Ok(output)
    }
}

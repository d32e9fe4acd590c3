//! Parsing of the model process's stdout.
//!
//! The feature model prints a bare float. The matchup model prints one JSON
//! object: either `{"predictions": {...}}`, `{"probability": p, "features": [...]}`
//! or `{"error": "..."}`.

use crate::domain::{is_probability, PredictionSet};
use crate::error::{HoopcastError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelOutput {
    Single {
        probability: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        features: Option<Value>,
    },
    Dual {
        predictions: PredictionSet,
    },
}

impl ModelOutput {
    /// Headline home-win probability; the basic model's when two are reported
    pub fn home_win_probability(&self) -> f64 {
        match self {
            ModelOutput::Single { probability, .. } => *probability,
            ModelOutput::Dual { predictions } => predictions.basic_model.probability,
        }
    }

    pub fn predictions(&self) -> Option<&PredictionSet> {
        match self {
            ModelOutput::Dual { predictions } => Some(predictions),
            ModelOutput::Single { .. } => None,
        }
    }

    pub fn features(&self) -> Option<&Value> {
        match self {
            ModelOutput::Single { features, .. } => features.as_ref(),
            ModelOutput::Dual { .. } => None,
        }
    }
}

pub fn parse_model_output(stdout: &str) -> Result<ModelOutput> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(malformed(stdout));
    }

    match parse_document(trimmed) {
        Err(HoopcastError::ModelOutput(_)) if trimmed.contains('\n') => {
            // stray prints before the result line
            let last = trimmed
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or_default();
            debug!("Model stdout had multiple lines, retrying with the last one");
            parse_document(last.trim()).map_err(|e| match e {
                HoopcastError::ModelOutput(_) => malformed(stdout),
                other => other,
            })
        }
        other => other,
    }
}

fn parse_document(text: &str) -> Result<ModelOutput> {
    if let Ok(value) = text.parse::<f64>() {
        return single(value, None, text);
    }

    let value: Value = serde_json::from_str(text).map_err(|_| malformed(text))?;
    match value {
        Value::Number(n) => single(n.as_f64().unwrap_or(f64::NAN), None, text),
        Value::Object(mut obj) => {
            if let Some(error) = obj.remove("error").filter(|e| !e.is_null()) {
                let message = match error {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                return Err(HoopcastError::ModelReported(message));
            }

            if let Some(predictions) = obj.remove("predictions") {
                let predictions: PredictionSet =
                    serde_json::from_value(predictions).map_err(|_| malformed(text))?;
                let all_valid = std::iter::once(&predictions.basic_model)
                    .chain(predictions.advanced_model.as_ref())
                    .all(|p| is_probability(p.probability));
                if !all_valid {
                    return Err(malformed(text));
                }
                return Ok(ModelOutput::Dual { predictions });
            }

            match obj.get("probability").and_then(Value::as_f64) {
                Some(probability) => single(probability, obj.remove("features"), text),
                None => Err(malformed(text)),
            }
        }
        _ => Err(malformed(text)),
    }
}

fn single(probability: f64, features: Option<Value>, raw: &str) -> Result<ModelOutput> {
    if !is_probability(probability) {
        return Err(malformed(raw));
    }
    Ok(ModelOutput::Single {
        probability,
        features: features.filter(|f| !f.is_null()),
    })
}

fn malformed(raw: &str) -> HoopcastError {
    HoopcastError::ModelOutput(raw.chars().take(200).collect())
}

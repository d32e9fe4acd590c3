use crate::domain::{MatchupMetadata, PredictionSet};
use serde::{Deserialize, Serialize};

/// Display names supplied by the caller; either side may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNames {
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
}

impl TeamNames {
    pub fn is_complete(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }

    /// Fill blanks from `other` without overriding caller-supplied names
    pub fn or(self, other: TeamNames) -> TeamNames {
        TeamNames {
            home: self.home.or(other.home),
            away: self.away.or(other.away),
        }
    }
}

fn display_name(name: Option<&str>, team_id: i32) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("Team {team_id}"),
    }
}

/// Build the analyst prompt from the basic model's prediction
pub fn explanation_prompt(
    predictions: &PredictionSet,
    metadata: &MatchupMetadata,
    names: &TeamNames,
) -> String {
    let basic = &predictions.basic_model;
    let home = display_name(names.home.as_deref(), metadata.home_team_id);
    let away = display_name(names.away.as_deref(), metadata.away_team_id);

    let accuracy_line = match basic.accuracy_pct() {
        Some(pct) => format!("- Model accuracy: {pct}%\n"),
        None => String::new(),
    };

    format!(
        r#"You are an NBA analyst explaining a game prediction to basketball fans.

PREDICTION DATA:
- {home} (home) vs {away} (away)
- Home team win probability: {win}%
{accuracy_line}- Home team rest days: {rest}

TASK: Explain this prediction in 2-3 sentences for a basketball fan. Focus on:
1. Which team is favored and by how much
2. Key factors that might influence the outcome
3. Keep it conversational and informative

Do not repeat the exact percentages. Make it sound natural.
"#,
        win = basic.probability_pct(),
        rest = metadata.home_rest_days,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelPrediction;

    fn predictions() -> PredictionSet {
        PredictionSet {
            basic_model: ModelPrediction::new(0.684, Some(0.711)),
            advanced_model: Some(ModelPrediction::new(0.6, Some(0.606))),
        }
    }

    fn metadata() -> MatchupMetadata {
        MatchupMetadata {
            home_team_id: 2,
            away_team_id: 14,
            home_rest_days: 3,
        }
    }

    #[test]
    fn test_prompt_uses_names_and_rounded_percentages() {
        let names = TeamNames {
            home: Some("Boston Celtics".to_string()),
            away: Some("Los Angeles Lakers".to_string()),
        };
        let prompt = explanation_prompt(&predictions(), &metadata(), &names);

        assert!(prompt.contains("- Boston Celtics (home) vs Los Angeles Lakers (away)"));
        assert!(prompt.contains("Home team win probability: 68%"));
        assert!(prompt.contains("Model accuracy: 71%"));
        assert!(prompt.contains("Home team rest days: 3"));
        assert!(prompt.contains("Do not repeat the exact percentages"));
    }

    #[test]
    fn test_prompt_falls_back_to_team_ids() {
        let names = TeamNames {
            home: Some("  ".to_string()),
            away: None,
        };
        let prompt = explanation_prompt(&predictions(), &metadata(), &names);
        assert!(prompt.contains("- Team 2 (home) vs Team 14 (away)"));
    }

    #[test]
    fn test_prompt_without_accuracy() {
        let set = PredictionSet {
            basic_model: ModelPrediction::new(0.5, None),
            advanced_model: None,
        };
        let prompt = explanation_prompt(&set, &metadata(), &TeamNames::default());
        assert!(!prompt.contains("Model accuracy"));
    }

    #[test]
    fn test_names_merge_prefers_caller() {
        let caller = TeamNames {
            home: Some("Celtics".to_string()),
            away: None,
        };
        let looked_up = TeamNames {
            home: Some("Boston Celtics".to_string()),
            away: Some("Los Angeles Lakers".to_string()),
        };
        let merged = caller.or(looked_up);
        assert_eq!(merged.home.as_deref(), Some("Celtics"));
        assert_eq!(merged.away.as_deref(), Some("Los Angeles Lakers"));
        assert!(merged.is_complete());
    }
}

/**
 * Prediction Types
 *
 * Match predictions published by admins. Premium predictions are only
 * shown in full to subscribers and admins; everyone else receives a
 * redacted copy with `locked = true`.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::forms::{self, FormRequest, FormSchema};

/// Settlement state of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionOutcome {
    #[default]
    Pending,
    Won,
    Lost,
    Void,
}

impl PredictionOutcome {
    pub const ALL: [PredictionOutcome; 4] = [
        PredictionOutcome::Pending,
        PredictionOutcome::Won,
        PredictionOutcome::Lost,
        PredictionOutcome::Void,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionOutcome::Pending => "pending",
            PredictionOutcome::Won => "won",
            PredictionOutcome::Lost => "lost",
            PredictionOutcome::Void => "void",
        }
    }
}

impl fmt::Display for PredictionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionOutcome {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PredictionOutcome::ALL
            .into_iter()
            .find(|outcome| outcome.as_str() == s)
            .ok_or_else(|| SharedError::validation("outcome", format!("Unknown outcome '{}'", s)))
    }
}

impl TryFrom<String> for PredictionOutcome {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A match prediction as stored in the `predictions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Prediction {
    pub id: Uuid,
    /// `None` once the author's account is deleted
    pub author_id: Option<Uuid>,
    pub sport: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff_at: DateTime<Utc>,
    pub tip: String,
    pub odds: f64,
    pub confidence: i32,
    pub analysis: String,
    pub is_premium: bool,
    #[cfg_attr(feature = "ssr", sqlx(try_from = "String"))]
    pub outcome: PredictionOutcome,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a particular viewer is allowed to see of a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionView {
    #[serde(flatten)]
    pub prediction: Prediction,
    /// True when the tip and analysis were withheld
    pub locked: bool,
}

impl Prediction {
    /// Produce the view for a viewer with or without premium access
    pub fn view_for(self, premium_access: bool) -> PredictionView {
        if self.is_premium && !premium_access {
            PredictionView {
                prediction: Prediction {
                    tip: String::new(),
                    analysis: String::new(),
                    ..self
                },
                locked: true,
            }
        } else {
            PredictionView {
                prediction: self,
                locked: false,
            }
        }
    }
}

/// Body of `POST /api/predictions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePredictionRequest {
    pub sport: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff_at: DateTime<Utc>,
    pub tip: String,
    pub odds: f64,
    pub confidence: i32,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub is_premium: bool,
}

impl CreatePredictionRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_odds(self.odds)?;
        validate_confidence(self.confidence)
    }
}

impl FormRequest for CreatePredictionRequest {
    fn schema() -> &'static FormSchema {
        &forms::PREDICTION
    }
}

/// Body of `PUT /api/predictions/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePredictionRequest {
    pub sport: Option<String>,
    pub league: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub kickoff_at: Option<DateTime<Utc>>,
    pub tip: Option<String>,
    pub odds: Option<f64>,
    pub confidence: Option<i32>,
    pub analysis: Option<String>,
    pub is_premium: Option<bool>,
    pub outcome: Option<PredictionOutcome>,
}

impl FormRequest for UpdatePredictionRequest {
    const PARTIAL: bool = true;

    fn schema() -> &'static FormSchema {
        &forms::PREDICTION
    }
}

/// Query string of `GET /api/predictions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionFilter {
    pub sport: Option<String>,
    pub outcome: Option<PredictionOutcome>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Odds must pay out more than the stake
pub fn validate_odds(odds: f64) -> Result<(), SharedError> {
    if odds.is_finite() && odds > 1.0 {
        Ok(())
    } else {
        Err(SharedError::validation("odds", "Odds must be greater than 1.0"))
    }
}

pub fn validate_confidence(confidence: i32) -> Result<(), SharedError> {
    if (1..=5).contains(&confidence) {
        Ok(())
    } else {
        Err(SharedError::validation("confidence", "Confidence must be between 1 and 5"))
    }
}

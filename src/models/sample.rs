use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SignLabel;

/// Normalized classifier output for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: SignLabel,
    pub confidence: f64,
}

impl Prediction {
    /// Confidence is clamped to [0, 1]; classifier backends are not trusted
    /// to stay in range.
    pub fn new(label: SignLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// One timestamped observation fed to the stabilizer. Ephemeral; samples are
/// never persisted individually.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sample {
    pub label: SignLabel,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn from_prediction(prediction: Prediction, timestamp: DateTime<Utc>) -> Self {
        Self {
            label: prediction.label,
            confidence: prediction.confidence,
            timestamp,
        }
    }
}

/// A stabilized letter accepted into the output sentence. Immutable once
/// created; carries everything the log record needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEvent {
    pub session_id: String,
    pub label: SignLabel,
    pub confidence: f64,
    pub user_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

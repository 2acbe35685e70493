//! Prediction log data model.
//!
//! One row per commit event: the durable trace of an interpreter session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SignLabel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionLog {
    pub id: Option<i64>,
    pub session_id: String,
    pub user_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub predicted_sign: SignLabel,
    pub confidence_score: f64,
    pub model_version: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SignLabel;

/// A user correction attached to a single prediction log row. Deleted with
/// the row it corrects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: Option<i64>,
    pub log_id: i64,
    pub timestamp: DateTime<Utc>,
    pub correct_sign: SignLabel,
    pub is_processed: bool,
}

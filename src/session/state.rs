use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Gender, UserProfile};

use super::SentenceAccumulator;

/// In-memory state of one interpreter run. Exclusively owned by its session:
/// created at start, mutated by commit events, discarded at teardown. The
/// durable trace lives in the prediction log, not here; `last_log_id` is the
/// only reference into the store, held so the most recent commit can be
/// corrected.
#[derive(Debug)]
pub struct SessionState {
    pub session_id: String,
    pub user_id: Option<i64>,
    pub gender: Gender,
    pub started_at: DateTime<Utc>,
    pub sentence: SentenceAccumulator,
    pub last_log_id: Option<i64>,
}

impl SessionState {
    pub fn new(user: Option<&UserProfile>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user.map(|profile| profile.user_id),
            gender: user.map(|profile| profile.gender).unwrap_or(Gender::Female),
            started_at: Utc::now(),
            sentence: SentenceAccumulator::new(),
            last_log_id: None,
        }
    }
}

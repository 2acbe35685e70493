use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_sign},
    models::FeedbackRecord,
};
use crate::models::SignLabel;

impl Database {
    /// Attaches a correction to an existing prediction log. Returns `false`
    /// when `log_id` references no row, leaving the store untouched; that
    /// case is a user-visible no-op, not a system fault.
    pub async fn insert_feedback(
        &self,
        log_id: i64,
        correct_sign: SignLabel,
        timestamp: DateTime<Utc>,
    ) -> Result<bool> {
        self.execute(move |conn| {
            let result = conn.execute(
                "INSERT INTO model_feedback (log_id, timestamp, correct_sign)
                 VALUES (?1, ?2, ?3)",
                params![
                    log_id,
                    timestamp.to_rfc3339(),
                    correct_sign.as_char().to_string(),
                ],
            );

            match result {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(err) => Err(err).context("failed to insert feedback"),
            }
        })
        .await
    }

    pub async fn get_feedback_for_log(&self, log_id: i64) -> Result<Vec<FeedbackRecord>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, log_id, timestamp, correct_sign, is_processed
                 FROM model_feedback
                 WHERE log_id = ?1
                 ORDER BY timestamp ASC",
            )?;

            let mut rows = stmt.query(params![log_id])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(FeedbackRecord {
                    id: Some(row.get(0)?),
                    log_id: row.get(1)?,
                    timestamp: parse_datetime(&row.get::<_, String>(2)?)?,
                    correct_sign: parse_sign(&row.get::<_, String>(3)?)?,
                    is_processed: row.get(4)?,
                });
            }

            Ok(records)
        })
        .await
    }

    /// Unprocessed feedback across all sessions, oldest first. Retraining
    /// jobs drain this and flip `is_processed`.
    pub async fn get_unprocessed_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, log_id, timestamp, correct_sign, is_processed
                 FROM model_feedback
                 WHERE is_processed = 0
                 ORDER BY timestamp ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(FeedbackRecord {
                    id: Some(row.get(0)?),
                    log_id: row.get(1)?,
                    timestamp: parse_datetime(&row.get::<_, String>(2)?)?,
                    correct_sign: parse_sign(&row.get::<_, String>(3)?)?,
                    is_processed: row.get(4)?,
                });
            }

            Ok(records)
        })
        .await
    }

    pub async fn mark_feedback_processed(&self, feedback_id: i64) -> Result<()> {
        self.execute(move |conn| {
            conn.execute(
                "UPDATE model_feedback SET is_processed = 1 WHERE id = ?1",
                params![feedback_id],
            )
            .context("failed to mark feedback processed")?;
            Ok(())
        })
        .await
    }
}

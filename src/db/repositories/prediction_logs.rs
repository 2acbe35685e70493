use anyhow::{Context, Result};
use rusqlite::params;

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_sign},
    models::PredictionLog,
};

impl Database {
    /// Appends one commit to the durable trace and returns its log id, the
    /// only handle under which a correction can later be attached.
    pub async fn insert_prediction_log(&self, log: &PredictionLog) -> Result<i64> {
        let record = log.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO prediction_logs (
                    session_id,
                    user_id,
                    timestamp,
                    predicted_sign,
                    confidence_score,
                    model_version
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.session_id,
                    record.user_id,
                    record.timestamp.to_rfc3339(),
                    record.predicted_sign.as_char().to_string(),
                    record.confidence_score,
                    record.model_version,
                ],
            )
            .context("failed to insert prediction log")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn get_logs_for_session(&self, session_id: &str) -> Result<Vec<PredictionLog>> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, user_id, timestamp, predicted_sign,
                        confidence_score, model_version
                 FROM prediction_logs
                 WHERE session_id = ?1
                 ORDER BY timestamp ASC, id ASC",
            )?;

            let mut rows = stmt.query(params![session_id])?;
            let mut logs = Vec::new();
            while let Some(row) = rows.next()? {
                logs.push(PredictionLog {
                    id: Some(row.get(0)?),
                    session_id: row.get(1)?,
                    user_id: row.get(2)?,
                    timestamp: parse_datetime(&row.get::<_, String>(3)?)?,
                    predicted_sign: parse_sign(&row.get::<_, String>(4)?)?,
                    confidence_score: row.get(5)?,
                    model_version: row.get(6)?,
                });
            }

            Ok(logs)
        })
        .await
    }
}

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::db::{connection::Database, helpers::parse_datetime, models::UserAccount};
use crate::models::Gender;

impl Database {
    /// Creates an account row. Returns `None` when the username is already
    /// taken (unique constraint), which callers surface as a normal signup
    /// outcome rather than an error.
    pub async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        gender: Gender,
        created_at: DateTime<Utc>,
    ) -> Result<Option<i64>> {
        let username = username.to_string();
        let password_hash = password_hash.to_string();
        self.execute(move |conn| {
            let result = conn.execute(
                "INSERT INTO users (username, password_hash, gender, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    username,
                    password_hash,
                    gender.as_str(),
                    created_at.to_rfc3339(),
                ],
            );

            match result {
                Ok(_) => Ok(Some(conn.last_insert_rowid())),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(None)
                }
                Err(err) => Err(err).context("failed to insert user"),
            }
        })
        .await
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        let username = username.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password_hash, gender, created_at
                 FROM users
                 WHERE username = ?1",
            )?;

            let mut rows = stmt.query(params![username])?;
            if let Some(row) = rows.next()? {
                let account = UserAccount {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    gender: row
                        .get::<_, Option<String>>(3)?
                        .as_deref()
                        .and_then(Gender::from_str),
                    created_at: parse_datetime(&row.get::<_, String>(4)?)?,
                };
                Ok(Some(account))
            } else {
                Ok(None)
            }
        })
        .await
    }
}

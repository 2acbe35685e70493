//! Account registration and login on top of the durable store.
//!
//! Passwords are stored as `salt$digest` with a per-user random salt and an
//! iterated SHA-256 digest. Good enough for a demo deployment; swapping the
//! scheme only touches this module.

use anyhow::Result;
use chrono::Utc;
use log::info;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::db::Database;
use crate::models::{Gender, UserProfile};

const SALT_BYTES: usize = 16;
const HASH_ROUNDS: u32 = 10_000;

/// Outcome of a signup attempt. A taken username is an expected flow, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created(i64),
    UsernameTaken,
}

#[derive(Clone)]
pub struct Accounts {
    db: Database,
}

impl Accounts {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        gender: Gender,
    ) -> Result<Registration> {
        let hash = hash_password(password);
        match self
            .db
            .insert_user(username, &hash, gender, Utc::now())
            .await?
        {
            Some(user_id) => {
                info!("User '{}' registered", username);
                Ok(Registration::Created(user_id))
            }
            None => Ok(Registration::UsernameTaken),
        }
    }

    /// `None` on unknown username or wrong password; the two cases are not
    /// distinguished to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<UserProfile>> {
        let Some(account) = self.db.find_user_by_username(username).await? else {
            return Ok(None);
        };

        if !verify_password(password, &account.password_hash) {
            return Ok(None);
        }

        info!("User '{}' logged in", account.username);
        Ok(Some(UserProfile {
            user_id: account.id,
            username: account.username,
            gender: account.gender.unwrap_or(Gender::Female),
        }))
    }
}

fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}", to_hex(&salt), digest(password, &salt))
}

fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    let Some(salt) = from_hex(salt_hex) else {
        return false;
    };
    digest(password, &salt) == expected
}

fn digest(password: &str, salt: &[u8]) -> String {
    let mut current = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize();

    for _ in 1..HASH_ROUNDS {
        current = Sha256::new()
            .chain_update(salt)
            .chain_update(&current)
            .finalize();
    }

    to_hex(&current)
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}

fn from_hex(value: &str) -> Option<Vec<u8>> {
    if value.len() % 2 != 0 {
        return None;
    }
    (0..value.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&value[i..i + 2], 16).ok())
        .collect()
}

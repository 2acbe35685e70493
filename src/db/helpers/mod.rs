use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use crate::models::SignLabel;

pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid datetime '{value}': {err}"))
}

/// Signs are stored as single-character TEXT columns.
pub fn parse_sign(value: &str) -> Result<SignLabel> {
    let mut chars = value.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Err(anyhow!("invalid sign column value '{value}'"));
    };
    SignLabel::from_char(ch)
}

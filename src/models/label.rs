use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Number of classes the sign alphabet model distinguishes.
pub const ALPHABET_SIZE: usize = 26;

/// One of the 26 uppercase letters the classifier can produce.
///
/// Construction always goes through a validated conversion so the rest of
/// the pipeline can treat the inner character as a known-good letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignLabel(char);

impl SignLabel {
    /// Accepts either case; anything outside A-Z is rejected.
    pub fn from_char(value: char) -> Result<Self> {
        let upper = value.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            bail!("'{value}' is not a letter of the sign alphabet");
        }
        Ok(Self(upper))
    }

    /// Maps a model class index (0-based) to its letter.
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= ALPHABET_SIZE {
            bail!("class index {index} out of range for the sign alphabet");
        }
        Ok(Self((b'A' + index as u8) as char))
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    /// Lowercase form used for asset file names (`a.gif`, `a.wav`).
    pub fn asset_stem(&self) -> char {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for SignLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

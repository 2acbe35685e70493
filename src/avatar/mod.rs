//! Lookup of avatar animation assets for the voice-to-sign direction.
//!
//! Assets live at `<root>/<gender>/<letter>.gif`. A missing asset is a
//! per-letter warning surfaced to the user, never a pipeline failure.

use std::path::PathBuf;

use log::warn;

use crate::models::{Gender, SignLabel};

/// One letter of a planned playback: either resolved to an asset on disk or
/// recorded as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarStep {
    pub letter: SignLabel,
    pub asset: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AvatarCatalog {
    root: PathBuf,
}

impl AvatarCatalog {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn lookup(&self, gender: Gender, letter: SignLabel) -> Option<PathBuf> {
        let path = self
            .root
            .join(gender.as_str())
            .join(format!("{}.gif", letter.asset_stem()));
        path.is_file().then_some(path)
    }

    /// Resolves a recognized sentence into the sequence of avatar clips to
    /// play. Letters are uppercased, anything outside A-Z is dropped, and
    /// misses are kept in the plan so the UI can report them.
    pub fn plan_sentence(&self, gender: Gender, text: &str) -> Vec<AvatarStep> {
        text.chars()
            .filter_map(|ch| SignLabel::from_char(ch).ok())
            .map(|letter| {
                let asset = self.lookup(gender, letter);
                if asset.is_none() {
                    warn!("No avatar found for '{letter}'");
                }
                AvatarStep { letter, asset }
            })
            .collect()
    }
}

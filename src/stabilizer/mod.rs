//! Turns the noisy per-frame prediction stream into discrete letter commits.
//!
//! Single-sample classification jitters frame to frame, so a letter is only
//! accepted once it holds a majority across a full sliding window and the
//! latest sample clears the confidence gate. After a commit the window is
//! cleared: the next letter needs a fresh full window of the new sign, which
//! also gives the signer a natural pacing rhythm.

mod config;
mod window;

pub use config::StabilizerConfig;
pub use window::SlidingWindow;

use crate::models::{CommitEvent, Sample, SignLabel};

/// Per-session debouncing state machine. One instance per interpreter
/// session; samples must arrive one at a time, in temporal order.
#[derive(Debug)]
pub struct Stabilizer {
    config: StabilizerConfig,
    window: SlidingWindow,
    last_committed: Option<SignLabel>,
    session_id: String,
    user_id: Option<i64>,
}

impl Stabilizer {
    pub fn new(config: StabilizerConfig, session_id: String, user_id: Option<i64>) -> Self {
        let window = SlidingWindow::new(config.window_size);
        Self {
            config,
            window,
            last_committed: None,
            session_id,
            user_id,
        }
    }

    pub fn last_committed(&self) -> Option<SignLabel> {
        self.last_committed
    }

    /// Feeds one sample through the state machine. Returns a commit event at
    /// most once per stable run of a new letter, otherwise `None`. Never
    /// errors: an undersized window, an ambiguous majority, or a weak sample
    /// all just suppress the commit.
    pub fn observe(&mut self, sample: &Sample) -> Option<CommitEvent> {
        self.window.push(sample.label);

        if !self.window.is_full() {
            return None;
        }

        // Window is non-empty here, so a majority always exists.
        let majority = self.window.majority()?;

        if Some(majority) == self.last_committed {
            return None;
        }

        // The gate looks at the newest sample only: a low-confidence frame
        // holds back an otherwise stable window. Strictly greater, so a
        // sample sitting exactly on the threshold does not commit.
        if sample.confidence <= self.config.confidence_threshold {
            return None;
        }

        self.last_committed = Some(majority);
        self.window.clear();

        Some(CommitEvent {
            session_id: self.session_id.clone(),
            label: majority,
            confidence: sample.confidence,
            user_id: self.user_id,
            timestamp: sample.timestamp,
        })
    }
}

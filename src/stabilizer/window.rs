use std::collections::VecDeque;

use crate::models::SignLabel;

/// Fixed-capacity FIFO over the most recent labels. Oldest is evicted on
/// overflow; order is preserved because the majority tie-break depends on it.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    capacity: usize,
    labels: VecDeque<SignLabel>,
}

impl SlidingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            labels: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, label: SignLabel) {
        if self.labels.len() == self.capacity {
            self.labels.pop_front();
        }
        self.labels.push_back(label);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.labels.len() == self.capacity
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// The most frequent label in the window. Ties resolve to whichever of
    /// the tied labels appears first when scanning oldest to newest, so the
    /// result is deterministic for a given input order.
    pub fn majority(&self) -> Option<SignLabel> {
        let mut best: Option<(SignLabel, usize)> = None;
        for &candidate in &self.labels {
            let count = self
                .labels
                .iter()
                .filter(|&&label| label == candidate)
                .count();
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((candidate, count)),
            }
        }
        best.map(|(label, _)| label)
    }
}

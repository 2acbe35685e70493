/// Tunable thresholds for the prediction stabilizer.
#[derive(Debug, Clone)]
pub struct StabilizerConfig {
    /// How many consecutive samples vote on a letter. A commit is only
    /// possible once the window is full.
    pub window_size: usize,

    /// The latest sample's confidence must be strictly above this for the
    /// window majority to commit.
    pub confidence_threshold: f64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            confidence_threshold: 0.90,
        }
    }
}

use crate::models::SignLabel;

/// The growing output string for one interpreter session. Pure and
/// synchronous; consumes commit events, nothing else mutates it.
#[derive(Debug, Clone, Default)]
pub struct SentenceAccumulator {
    sentence: String,
}

impl SentenceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, letter: SignLabel) {
        self.sentence.push(letter.as_char());
    }

    pub fn current(&self) -> &str {
        &self.sentence
    }

    pub fn is_empty(&self) -> bool {
        self.sentence.is_empty()
    }

    /// Clears the sentence for a new session.
    pub fn reset(&mut self) {
        self.sentence.clear();
    }
}

mod controller;
mod sentence;
mod state;

pub use controller::InterpreterController;
pub use sentence::SentenceAccumulator;
pub use state::SessionState;

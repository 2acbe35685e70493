mod feedback;
mod prediction_log;
mod user;

pub use feedback::FeedbackRecord;
pub use prediction_log::PredictionLog;
pub use user::UserAccount;

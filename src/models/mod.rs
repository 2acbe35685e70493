mod label;
mod sample;
mod user;

pub use label::SignLabel;
pub use sample::{CommitEvent, Prediction, Sample};
pub use user::{Gender, UserProfile};

//! Boundary to the external sign classifier.
//!
//! The model itself is a black box behind the [`Classifier`] trait; this
//! module owns output normalization and the frame preprocessing the model
//! expects. Model availability is a session-start precondition: the
//! controller refuses to start without a working classifier, so per-frame
//! calls never have to handle a missing model.

pub mod preprocess;

use anyhow::Result;
use chrono::Utc;
use image::DynamicImage;

use crate::models::{Prediction, Sample};

/// Capability interface over the external model. Implementations run on a
/// blocking worker, so `classify` may be CPU-heavy but must be side-effect
/// free.
pub trait Classifier: Send + Sync {
    fn classify(&self, frame: &DynamicImage) -> Result<Prediction>;

    /// Version tag recorded with every logged prediction.
    fn model_version(&self) -> &str;
}

/// Runs one frame through the classifier and stamps the result. The
/// prediction's confidence has already been clamped by [`Prediction::new`].
pub fn classify_frame(classifier: &dyn Classifier, frame: &DynamicImage) -> Result<Sample> {
    let prediction = classifier.classify(frame)?;
    Ok(Sample::from_prediction(prediction, Utc::now()))
}

use anyhow::Result;
use image::DynamicImage;

/// Pull-based frame supplier. The real implementation wraps a webcam; tests
/// and the replay binary use scripted sources.
///
/// Any error is fatal to the current interpretation run: the capture loop
/// surfaces it and exits rather than retrying a dead device in a tight loop.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<DynamicImage>;
}

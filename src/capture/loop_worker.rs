use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info, warn};
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::classifier::{classify_frame, Classifier};
use crate::models::Sample;

use super::FrameSource;

const FRAME_TIMEOUT_SECS: u64 = 5;

/// Grabs frames at a fixed cadence, classifies each on a blocking worker and
/// publishes the newest sample into the watch slot. The stabilize task on
/// the other side of the channel is the single consumer; the slot keeps only
/// the latest sample because stale frames are valueless.
///
/// Exits on cancellation, on a capture error (fatal to the run) or when the
/// consumer goes away.
pub async fn capture_loop(
    session_id: String,
    mut source: Box<dyn FrameSource>,
    classifier: Arc<dyn Classifier>,
    sample_tx: watch::Sender<Option<Sample>>,
    frame_interval: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let fut = process_frame(&mut source, &classifier, &sample_tx);
                match tokio::time::timeout(Duration::from_secs(FRAME_TIMEOUT_SECS), fut).await {
                    Ok(Ok(true)) => {}
                    Ok(Ok(false)) => {
                        info!("sample receiver gone, capture loop for session {} exiting", session_id);
                        break;
                    }
                    Ok(Err(err)) => {
                        error!("frame capture failed for session {}: {err:?}", session_id);
                        break;
                    }
                    Err(_) => {
                        warn!(
                            "frame processing timeout (> {}s) session {}, skipping frame",
                            FRAME_TIMEOUT_SECS, session_id
                        );
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                info!("capture loop for session {} shutting down", session_id);
                break;
            }
        }
    }
}

/// Returns `Ok(false)` once the receiving side has been dropped, which is a
/// normal teardown signal rather than an error.
async fn process_frame(
    source: &mut Box<dyn FrameSource>,
    classifier: &Arc<dyn Classifier>,
    sample_tx: &watch::Sender<Option<Sample>>,
) -> Result<bool> {
    let frame = source.next_frame().context("frame capture failed")?;

    let classifier = Arc::clone(classifier);
    let sample = tokio::task::spawn_blocking(move || classify_frame(classifier.as_ref(), &frame))
        .await
        .context("classifier worker join failed")??;

    Ok(sample_tx.send(Some(sample)).is_ok())
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use log::{error, info, warn};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::capture::{capture_loop, FrameSource};
use crate::classifier::Classifier;
use crate::db::{models::PredictionLog, Database};
use crate::models::{CommitEvent, Sample, SignLabel, UserProfile};
use crate::speech::Speaker;
use crate::stabilizer::{Stabilizer, StabilizerConfig};

use super::SessionState;

const LOG_WRITE_TIMEOUT_SECS: u64 = 2;

struct ActiveSession {
    state: Arc<Mutex<SessionState>>,
    cancel_token: CancellationToken,
    capture: JoinHandle<()>,
    stabilize: JoinHandle<()>,
}

/// Owns the lifecycle of interpreter sessions: spawns the capture loop and
/// the stabilize task, fans commit events out to the sentence, the log and
/// the speaker, and tears everything down on stop. One session at a time.
pub struct InterpreterController {
    db: Database,
    speaker: Arc<dyn Speaker>,
    config: StabilizerConfig,
    frame_interval: Duration,
    active: Mutex<Option<ActiveSession>>,
}

impl InterpreterController {
    pub fn new(
        db: Database,
        speaker: Arc<dyn Speaker>,
        config: StabilizerConfig,
        frame_interval: Duration,
    ) -> Self {
        Self {
            db,
            speaker,
            config,
            frame_interval,
            active: Mutex::new(None),
        }
    }

    /// Starts an interpreter run. The classifier must already be loaded;
    /// model availability is the caller's session-start precondition, never
    /// checked per frame.
    pub async fn start_session(
        &self,
        source: Box<dyn FrameSource>,
        classifier: Arc<dyn Classifier>,
        user: Option<&UserProfile>,
    ) -> Result<String> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            bail!("interpreter session already active");
        }

        let state = SessionState::new(user);
        let session_id = state.session_id.clone();
        info!(
            "Starting interpreter session {} (user: {:?})",
            session_id, state.user_id
        );

        // The version tag recorded with every log row travels with the
        // loaded model, not with the pipeline configuration.
        let model_version = classifier.model_version().to_string();

        let stabilizer = Stabilizer::new(self.config.clone(), session_id.clone(), state.user_id);
        let state = Arc::new(Mutex::new(state));

        // Single-slot handoff: the capture side overwrites, the stabilize
        // side reads whatever is newest. Stale frames are valueless, so no
        // queue and no backpressure.
        let (sample_tx, sample_rx) = watch::channel::<Option<Sample>>(None);

        let cancel_token = CancellationToken::new();

        let capture = tokio::spawn(capture_loop(
            session_id.clone(),
            source,
            classifier,
            sample_tx,
            self.frame_interval,
            cancel_token.clone(),
        ));

        let stabilize = tokio::spawn(stabilize_loop(
            sample_rx,
            stabilizer,
            model_version,
            Arc::clone(&state),
            self.db.clone(),
            Arc::clone(&self.speaker),
            cancel_token.clone(),
        ));

        *active = Some(ActiveSession {
            state,
            cancel_token,
            capture,
            stabilize,
        });

        Ok(session_id)
    }

    /// Tears the session down: stops the capture loop, discards in-flight
    /// samples, releases stabilizer state. Returns the final sentence.
    pub async fn stop_session(&self) -> Result<String> {
        let Some(session) = self.active.lock().await.take() else {
            bail!("no active interpreter session");
        };

        session.cancel_token.cancel();
        self.speaker.interrupt();

        if let Err(err) = session.capture.await {
            error!("capture task failed to join: {err}");
        }
        if let Err(err) = session.stabilize.await {
            error!("stabilize task failed to join: {err}");
        }

        let state = session.state.lock().await;
        let sentence = state.sentence.current().to_string();
        info!(
            "Interpreter session {} ended with sentence {:?}",
            state.session_id, sentence
        );
        Ok(sentence)
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// The sentence accumulated so far, or `None` when no session runs.
    pub async fn current_sentence(&self) -> Option<String> {
        let active = self.active.lock().await;
        let session = active.as_ref()?;
        let state = session.state.lock().await;
        Some(state.sentence.current().to_string())
    }

    /// Attaches a correction to the most recent logged commit. Fails as a
    /// plain no-op when nothing has been logged yet (or the last log write
    /// was dropped); the live pipeline is unaffected either way.
    pub async fn correct_last(&self, correct_sign: SignLabel) -> Result<()> {
        let log_id = {
            let active = self.active.lock().await;
            let session = active
                .as_ref()
                .ok_or_else(|| anyhow!("no active interpreter session"))?;
            let state = session.state.lock().await;
            state
                .last_log_id
                .ok_or_else(|| anyhow!("no logged prediction available to correct"))?
        };

        let attached = self
            .db
            .insert_feedback(log_id, correct_sign, chrono::Utc::now())
            .await?;
        if !attached {
            bail!("prediction log {log_id} no longer exists");
        }
        Ok(())
    }
}

/// Single consumer of the sample slot. Feeds the stabilizer strictly one
/// sample at a time in arrival order; ordering is load-bearing for both the
/// majority tie-break and repeat suppression.
async fn stabilize_loop(
    mut sample_rx: watch::Receiver<Option<Sample>>,
    mut stabilizer: Stabilizer,
    model_version: String,
    state: Arc<Mutex<SessionState>>,
    db: Database,
    speaker: Arc<dyn Speaker>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            changed = sample_rx.changed() => {
                if changed.is_err() {
                    // Capture side is gone; nothing more will arrive.
                    break;
                }
                let sample = *sample_rx.borrow_and_update();
                let Some(sample) = sample else {
                    continue;
                };
                if let Some(event) = stabilizer.observe(&sample) {
                    handle_commit(event, &model_version, &state, &db, &speaker).await;
                }
            }
            _ = cancel_token.cancelled() => {
                break;
            }
        }
    }
}

/// Fan-out for one commit: sentence append is synchronous, speech and the
/// durable log write both happen off the stabilization path. A failed or
/// slow log write only costs the correction handle for this letter.
async fn handle_commit(
    event: CommitEvent,
    model_version: &str,
    state: &Arc<Mutex<SessionState>>,
    db: &Database,
    speaker: &Arc<dyn Speaker>,
) {
    info!(
        "Committed '{}' (confidence {:.3}) in session {}",
        event.label, event.confidence, event.session_id
    );

    {
        let mut guard = state.lock().await;
        guard.sentence.push(event.label);
    }

    if let Err(err) = speaker.speak(&event.label.to_string()) {
        warn!("speech playback failed: {err:#}");
    }

    let record = PredictionLog {
        id: None,
        session_id: event.session_id.clone(),
        user_id: event.user_id,
        timestamp: event.timestamp,
        predicted_sign: event.label,
        confidence_score: event.confidence,
        model_version: model_version.to_string(),
    };

    let db = db.clone();
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let write = db.insert_prediction_log(&record);
        match tokio::time::timeout(Duration::from_secs(LOG_WRITE_TIMEOUT_SECS), write).await {
            Ok(Ok(log_id)) => {
                state.lock().await.last_log_id = Some(log_id);
            }
            Ok(Err(err)) => {
                warn!("prediction log write failed: {err:#}");
            }
            Err(_) => {
                warn!(
                    "prediction log write timed out (> {}s)",
                    LOG_WRITE_TIMEOUT_SECS
                );
            }
        }
    });
}

//! Trace replay: runs a recorded prediction stream through the live
//! stabilization pipeline and prints what would have been committed.
//!
//! Useful for tuning the window size and confidence threshold against a
//! capture trace without a webcam or a loaded model.
//!
//! Usage: `signbridge <trace.json> [db-path]`
//!
//! A trace is a JSON array of `{"label": "A", "confidence": 0.95}` entries,
//! one per frame, in capture order.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::warn;
use serde::Deserialize;

use signbridge::db::{models::PredictionLog, Database};
use signbridge::models::{Sample, SignLabel};
use signbridge::session::SentenceAccumulator;
use signbridge::settings::SettingsStore;
use signbridge::stabilizer::Stabilizer;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct TraceSample {
    label: char,
    confidence: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(trace_path) = args.next() else {
        bail!("usage: signbridge <trace.json> [db-path]");
    };
    let db_path: PathBuf = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| "signbridge.sqlite3".into());

    let contents = std::fs::read_to_string(&trace_path)
        .with_context(|| format!("failed to read trace {trace_path}"))?;
    let trace: Vec<TraceSample> =
        serde_json::from_str(&contents).context("trace is not a valid sample array")?;

    let settings = SettingsStore::new("signbridge.settings.json".into())?;
    let interpreter = settings.interpreter();

    let db = Database::new(db_path)?;
    let session_id = Uuid::new_v4().to_string();
    let mut stabilizer =
        Stabilizer::new(interpreter.stabilizer_config(), session_id.clone(), None);
    let mut sentence = SentenceAccumulator::new();

    println!("Replaying {} samples (session {session_id})", trace.len());

    for (index, entry) in trace.iter().enumerate() {
        let label = SignLabel::from_char(entry.label)
            .with_context(|| format!("trace entry {index} has an invalid label"))?;
        let sample = Sample {
            label,
            confidence: entry.confidence.clamp(0.0, 1.0),
            timestamp: Utc::now(),
        };

        let Some(event) = stabilizer.observe(&sample) else {
            continue;
        };

        sentence.push(event.label);

        let record = PredictionLog {
            id: None,
            session_id: event.session_id.clone(),
            user_id: None,
            timestamp: event.timestamp,
            predicted_sign: event.label,
            confidence_score: event.confidence,
            model_version: interpreter.model_version.clone(),
        };
        let logged = match db.insert_prediction_log(&record).await {
            Ok(log_id) => format!("log #{log_id}"),
            Err(err) => {
                warn!("prediction log write failed: {err:#}");
                "not logged".to_string()
            }
        };

        println!(
            "frame {index:>5}: committed '{}' (confidence {:.3}, {logged})",
            event.label, event.confidence
        );
    }

    let logs = db.get_logs_for_session(&session_id).await?;
    println!("Sentence: {:?}", sentence.current());
    println!("{} commits persisted", logs.len());

    Ok(())
}

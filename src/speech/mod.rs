//! Speech playback for committed letters and finished sentences.
//!
//! Playback runs on a dedicated thread holding the non-Send rodio objects;
//! callers talk to it over a channel, so `speak` returns immediately and
//! never stalls the capture path. At most one utterance is in flight: a new
//! `speak` stops whatever is still playing, because the most recent commit
//! wins.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use anyhow::{anyhow, Result};
use log::{debug, warn};
use rodio::{Decoder, OutputStream, Sink};

use crate::models::SignLabel;

/// Capability interface so the pipeline can be tested without an audio
/// device. A failed or missing utterance is never fatal to interpretation.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str) -> Result<()>;
    fn interrupt(&self);
}

/// Speaker that does nothing. Used in tests and headless replay runs.
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        debug!("(muted) speak: {text}");
        Ok(())
    }

    fn interrupt(&self) {}
}

enum PlaybackCommand {
    Speak(Vec<PathBuf>),
    Interrupt,
}

/// Plays prerecorded per-letter clips (`<clip_dir>/<letter>.wav`) through
/// rodio. Letters without a clip are skipped with a warning.
pub struct ClipSpeaker {
    clip_dir: PathBuf,
    tx: Arc<Mutex<Option<Sender<PlaybackCommand>>>>,
}

impl ClipSpeaker {
    pub fn new(clip_dir: PathBuf) -> Self {
        Self {
            clip_dir,
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<PlaybackCommand>> {
        if let Some(tx) = self
            .tx
            .lock()
            .map_err(|_| anyhow!("speaker channel lock poisoned"))?
            .as_ref()
        {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<PlaybackCommand>();

        thread::Builder::new()
            .name("signbridge-speech".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        PlaybackCommand::Speak(clips) => {
                            // Newest utterance wins over anything in flight.
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            _stream = None;

                            let (stream, handle) = match OutputStream::try_default() {
                                Ok(pair) => pair,
                                Err(err) => {
                                    warn!("Failed to open audio output: {err}");
                                    continue;
                                }
                            };
                            let active = match Sink::try_new(&handle) {
                                Ok(new_sink) => new_sink,
                                Err(err) => {
                                    warn!("Failed to create audio sink: {err}");
                                    continue;
                                }
                            };

                            for clip in clips {
                                let file = match File::open(&clip) {
                                    Ok(file) => file,
                                    Err(err) => {
                                        warn!("Clip {} unavailable: {err}", clip.display());
                                        continue;
                                    }
                                };
                                match Decoder::new(BufReader::new(file)) {
                                    Ok(decoded) => active.append(decoded),
                                    Err(err) => {
                                        warn!("Clip {} undecodable: {err}", clip.display())
                                    }
                                }
                            }

                            _stream = Some(stream);
                            sink = Some(active);
                        }
                        PlaybackCommand::Interrupt => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                        }
                    }
                }
            })
            .map_err(|err| anyhow!("failed to spawn speech thread: {err}"))?;

        let tx_clone = tx.clone();
        *self
            .tx
            .lock()
            .map_err(|_| anyhow!("speaker channel lock poisoned"))? = Some(tx);
        Ok(tx_clone)
    }

    fn clip_path(&self, letter: SignLabel) -> PathBuf {
        self.clip_dir.join(format!("{}.wav", letter.asset_stem()))
    }
}

impl Speaker for ClipSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        let mut clips = Vec::new();
        for ch in text.chars() {
            let Ok(letter) = SignLabel::from_char(ch) else {
                continue;
            };
            let path = self.clip_path(letter);
            if path.is_file() {
                clips.push(path);
            } else {
                warn!("No speech clip for '{letter}'");
            }
        }

        if clips.is_empty() {
            return Ok(());
        }

        let tx = self.ensure_thread()?;
        tx.send(PlaybackCommand::Speak(clips))
            .map_err(|err| anyhow!("speech thread unavailable: {err}"))
    }

    fn interrupt(&self) {
        if let Ok(guard) = self.tx.lock() {
            if let Some(tx) = guard.as_ref() {
                let _ = tx.send(PlaybackCommand::Interrupt);
            }
        }
    }
}

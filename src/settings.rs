use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf, sync::RwLock};

use crate::stabilizer::StabilizerConfig;

/// Externally supplied knobs for the interpretation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterSettings {
    pub window_size: usize,
    pub confidence_threshold: f64,
    pub model_version: String,
    pub frame_interval_ms: u64,
    pub avatar_dir: PathBuf,
    pub clip_dir: PathBuf,
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        Self {
            window_size: 5,
            confidence_threshold: 0.90,
            model_version: "v1.0-64x64".into(),
            frame_interval_ms: 100,
            avatar_dir: "avatars".into(),
            clip_dir: "clips".into(),
        }
    }
}

impl InterpreterSettings {
    pub fn stabilizer_config(&self) -> StabilizerConfig {
        StabilizerConfig {
            window_size: self.window_size,
            confidence_threshold: self.confidence_threshold,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct UserSettings {
    interpreter: InterpreterSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn interpreter(&self) -> InterpreterSettings {
        self.data.read().unwrap().interpreter.clone()
    }

    pub fn update_interpreter(&self, settings: InterpreterSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.interpreter = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
